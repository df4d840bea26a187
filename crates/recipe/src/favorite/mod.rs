use std::ops::Deref;

use foodgram_db::table::Favorite;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

#[derive(Clone)]
pub struct Command(pub(crate) foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub async fn save(&self, user_id: i64, recipe_id: i64) -> foodgram_shared::Result<()> {
        if crate::root::find_owner(&self.read_db, recipe_id)
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("recipe");
        }

        let (sql, values) = Query::insert()
            .into_table(Favorite::Table)
            .columns([Favorite::UserId, Favorite::RecipeId, Favorite::CreatedAt])
            .values_panic([
                user_id.into(),
                recipe_id.into(),
                foodgram_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => Ok(()),
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                foodgram_shared::user!("Recipe is already in favorites.")
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn unsave(&self, user_id: i64, recipe_id: i64) -> foodgram_shared::Result<()> {
        if crate::root::find_owner(&self.read_db, recipe_id)
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("recipe");
        }

        let (sql, values) = Query::delete()
            .from_table(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(user_id))
            .and_where(Expr::col(Favorite::RecipeId).eq(recipe_id))
            .build_sqlx(SqliteQueryBuilder);

        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::user!("Recipe not found in favorites.");
        }

        Ok(())
    }
}
