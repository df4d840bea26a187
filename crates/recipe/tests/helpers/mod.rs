use std::{path::PathBuf, str::FromStr};

use foodgram_recipe::{
    IngredientAmount, RecipeInput,
    catalog::{IngredientInput, TagInput},
};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

pub struct Catalog {
    pub tags: Vec<i64>,
    pub ingredients: Vec<i64>,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<foodgram_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(foodgram_shared::State::single(pool))
}

#[allow(dead_code)]
pub async fn create_user(state: &foodgram_shared::State, name: &str) -> anyhow::Result<i64> {
    let result = sqlx::query(
        r#"INSERT INTO "user" (email, username, first_name, last_name, password, is_staff, created_at) VALUES (?, ?, 'John', 'Doe', '', 0, 0)"#,
    )
    .bind(format!("{name}@foodgram.localhost"))
    .bind(name)
    .execute(&state.write_db)
    .await?;

    Ok(result.last_insert_rowid())
}

#[allow(dead_code)]
pub async fn create_catalog(state: &foodgram_shared::State) -> anyhow::Result<Catalog> {
    let cmd = foodgram_recipe::catalog::Command(state.clone());

    let mut tags = vec![];
    for (name, color, slug) in [
        ("Breakfast", "#E26C2D", "breakfast"),
        ("Lunch", "#49B64E", "lunch"),
        ("Dinner", "#8775D2", "dinner"),
    ] {
        let id = cmd
            .create_tag(TagInput {
                name: name.to_owned(),
                color: color.to_owned(),
                slug: slug.to_owned(),
            })
            .await?;
        tags.push(id);
    }

    let inputs = [("flour", "g"), ("flour", "cup"), ("sugar", "g"), ("egg", "pcs")]
        .into_iter()
        .map(|(name, unit)| IngredientInput {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        })
        .collect::<Vec<_>>();
    cmd.import_ingredients(inputs.clone()).await?;

    let stored = foodgram_recipe::Query(state.clone()).ingredients(None).await?;
    let ingredients = inputs
        .iter()
        .filter_map(|input| {
            stored
                .iter()
                .find(|i| i.name == input.name && i.measurement_unit == input.measurement_unit)
                .map(|i| i.id)
        })
        .collect();

    Ok(Catalog { tags, ingredients })
}

#[allow(dead_code)]
pub fn recipe_input(name: &str, tags: &[i64], ingredients: &[(i64, i64)]) -> RecipeInput {
    RecipeInput {
        ingredients: ingredients
            .iter()
            .map(|(id, amount)| IngredientAmount {
                id: *id,
                amount: *amount,
            })
            .collect(),
        tags: tags.to_vec(),
        image: Some(IMAGE.to_owned()),
        name: name.to_owned(),
        text: format!("How to cook {name}"),
        cooking_time: 30,
    }
}
