use foodgram_db::table::Recipe;
use foodgram_shared::Actor;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    pub async fn delete(&self, actor: Actor, id: i64) -> foodgram_shared::Result<()> {
        let Some(recipe) = super::find_owner(&self.read_db, id).await? else {
            foodgram_shared::not_found!("recipe");
        };

        if !actor.can_modify(recipe.author_id) {
            foodgram_shared::forbidden!();
        }

        let (sql, values) = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(recipe_id = id, user_id = actor.id, "recipe deleted");

        Ok(())
    }
}
