use std::ops::Deref;

use foodgram_db::table::{Recipe, ShoppingCart};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

#[derive(Clone)]
pub struct Command(pub foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    async fn recipe_exists(&self, recipe_id: i64) -> foodgram_shared::Result<bool> {
        let (sql, values) = Query::select()
            .column(Recipe::Id)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(recipe_id))
            .build_sqlx(SqliteQueryBuilder);

        let id: Option<i64> = sqlx::query_scalar_with(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(id.is_some())
    }

    #[tracing::instrument(skip(self))]
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> foodgram_shared::Result<()> {
        if !self.recipe_exists(recipe_id).await? {
            foodgram_shared::not_found!("recipe");
        }

        let (sql, values) = Query::insert()
            .into_table(ShoppingCart::Table)
            .columns([
                ShoppingCart::UserId,
                ShoppingCart::RecipeId,
                ShoppingCart::CreatedAt,
            ])
            .values_panic([
                user_id.into(),
                recipe_id.into(),
                foodgram_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => Ok(()),
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                foodgram_shared::user!("Recipe is already in the shopping list.")
            }
            Err(err) => Err(err.into()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> foodgram_shared::Result<()> {
        if !self.recipe_exists(recipe_id).await? {
            foodgram_shared::not_found!("recipe");
        }

        let (sql, values) = Query::delete()
            .from_table(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
            .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::user!("Recipe not found in the shopping list.");
        }

        Ok(())
    }
}
