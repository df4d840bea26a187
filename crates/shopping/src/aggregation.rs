use std::collections::{HashMap, HashSet, hash_map::Entry};

use serde::Serialize;
use sqlx::prelude::FromRow;

pub const HEADER: &str = "Shopping list:";

/// Raised when a shopping list is requested for a cart with no recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("The shopping cart is empty.")]
pub struct EmptyCart;

impl From<EmptyCart> for foodgram_shared::Error {
    fn from(value: EmptyCart) -> Self {
        Self::User(value.to_string())
    }
}

/// Raised when an ingredient total no longer fits in an `i64`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Total amount of {name} ({measurement_unit}) is too large.")]
pub struct AmountOverflow {
    pub name: String,
    pub measurement_unit: String,
}

impl From<AmountOverflow> for foodgram_shared::Error {
    fn from(value: AmountOverflow) -> Self {
        Self::User(value.to_string())
    }
}

/// One ingredient requirement of one recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CartLine {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingItem {
    pub ingredient_id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

/// Sums cart lines per ingredient.
///
/// Lines are grouped by ingredient id, so two ingredients sharing a name but
/// not a unit stay apart. A (recipe, ingredient) pair seen twice counts once.
/// The result is ordered by case-folded name, then unit, then ingredient id.
pub fn aggregate(
    lines: impl IntoIterator<Item = CartLine>,
) -> Result<Vec<ShoppingItem>, AmountOverflow> {
    let mut seen = HashSet::new();
    let mut groups: HashMap<i64, ShoppingItem> = HashMap::new();

    for line in lines {
        if !seen.insert((line.recipe_id, line.ingredient_id)) {
            continue;
        }

        match groups.entry(line.ingredient_id) {
            Entry::Occupied(mut entry) => {
                let item = entry.get_mut();
                let Some(total) = item.total_amount.checked_add(line.amount) else {
                    return Err(AmountOverflow {
                        name: item.name.to_owned(),
                        measurement_unit: item.measurement_unit.to_owned(),
                    });
                };
                item.total_amount = total;
            }
            Entry::Vacant(entry) => {
                entry.insert(ShoppingItem {
                    ingredient_id: line.ingredient_id,
                    name: line.name,
                    measurement_unit: line.measurement_unit,
                    total_amount: line.amount,
                });
            }
        }
    }

    let mut items = groups
        .into_values()
        .map(|item| (item.name.to_lowercase(), item))
        .collect::<Vec<_>>();

    items.sort_by(|(a_key, a), (b_key, b)| {
        a_key
            .cmp(b_key)
            .then_with(|| a.measurement_unit.cmp(&b.measurement_unit))
            .then_with(|| a.ingredient_id.cmp(&b.ingredient_id))
    });

    Ok(items.into_iter().map(|(_, item)| item).collect())
}

/// Plain text export: the header, then `<Name> (<unit>) - <amount>` per item.
pub fn render(items: &[ShoppingItem]) -> String {
    let mut text = format!("{HEADER}\n");

    for item in items {
        text.push_str(&format!(
            "{} ({}) - {}\n",
            capitalize(&item.name),
            item.measurement_unit,
            item.total_amount
        ));
    }

    text
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
