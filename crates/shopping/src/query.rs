use std::ops::Deref;

use foodgram_db::table::ShoppingCart;
use sea_query::{Expr, ExprTrait, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{CartLine, EmptyCart, ShoppingItem};

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

const CART_LINES: &str = r#"
SELECT ri.recipe_id, i.id AS ingredient_id, i.name, i.measurement_unit, ri.amount
FROM recipe_ingredient ri
JOIN ingredient i ON i.id = ri.ingredient_id
WHERE ri.recipe_id IN (SELECT recipe_id FROM shopping_cart WHERE user_id = ?)
"#;

impl Query {
    /// Ingredient totals across every recipe in the user's cart.
    #[tracing::instrument(skip(self))]
    pub async fn shopping_list(&self, user_id: i64) -> foodgram_shared::Result<Vec<ShoppingItem>> {
        let (sql, values) = SeaQuery::select()
            .column(ShoppingCart::RecipeId)
            .from(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let first: Option<i64> = sqlx::query_scalar_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        if first.is_none() {
            return Err(EmptyCart.into());
        }

        let lines = sqlx::query_as::<_, CartLine>(CART_LINES)
            .bind(user_id)
            .fetch_all(&self.read_db)
            .await?;

        let items = crate::aggregate(lines)?;

        tracing::debug!(items = items.len(), "shopping list aggregated");

        Ok(items)
    }

    /// The shopping list rendered as the downloadable text file.
    pub async fn export(&self, user_id: i64) -> foodgram_shared::Result<String> {
        let items = self.shopping_list(user_id).await?;

        Ok(crate::render(&items))
    }
}
