use foodgram_db::table::{Recipe, RecipeIngredient, RecipeTag};
use foodgram_shared::Actor;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::RecipeInput;

impl super::Command {
    /// Rewrites a recipe; tags and ingredient lines are replaced as a whole and
    /// the image is kept when none is sent.
    #[tracing::instrument(skip_all, fields(recipe_id = id, user_id = actor.id))]
    pub async fn update(
        &self,
        actor: Actor,
        id: i64,
        input: RecipeInput,
    ) -> foodgram_shared::Result<()> {
        let Some(recipe) = super::find_owner(&self.read_db, id).await? else {
            foodgram_shared::not_found!("recipe");
        };

        if !actor.can_modify(recipe.author_id) {
            foodgram_shared::forbidden!();
        }

        let image = self.check_input(&input).await?;

        let mut tx = self.write_db.begin().await?;

        let mut statement = Query::update()
            .table(Recipe::Table)
            .value(Recipe::Name, input.name.to_owned())
            .value(Recipe::Text, input.text.to_owned())
            .value(Recipe::CookingTime, input.cooking_time)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        if let Some(image) = image {
            statement
                .value(Recipe::Image, image.bytes)
                .value(Recipe::ImageType, image.content_type);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = Query::delete()
            .from_table(RecipeTag::Table)
            .and_where(Expr::col(RecipeTag::RecipeId).eq(id))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let (sql, values) = Query::delete()
            .from_table(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).eq(id))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        super::insert_relations(&mut *tx, id, &input).await?;

        tx.commit().await?;

        Ok(())
    }
}
