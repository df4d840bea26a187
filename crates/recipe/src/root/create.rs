use foodgram_db::table::Recipe;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use super::RecipeInput;

impl super::Command {
    #[tracing::instrument(skip_all, fields(author_id = author_id))]
    pub async fn create(&self, author_id: i64, input: RecipeInput) -> foodgram_shared::Result<i64> {
        let Some(image) = self.check_input(&input).await? else {
            foodgram_shared::field!("image", "This field is required.");
        };

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Text,
                Recipe::CookingTime,
                Recipe::Image,
                Recipe::ImageType,
                Recipe::CreatedAt,
            ])
            .values_panic([
                author_id.into(),
                input.name.to_owned().into(),
                input.text.to_owned().into(),
                input.cooking_time.into(),
                image.bytes.into(),
                image.content_type.into(),
                foodgram_shared::now().into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        super::insert_relations(&mut *tx, id, &input).await?;

        tx.commit().await?;

        tracing::info!(recipe_id = id, "recipe created");

        Ok(id)
    }
}
