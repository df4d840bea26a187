use foodgram_db::table::Ingredient;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngredientInput {
    pub name: String,
    pub measurement_unit: String,
}

/// Reads ingredients from a JSON array (`[{"name", "measurement_unit"}]`) or
/// from headerless CSV records of `name,measurement_unit`.
pub fn parse_ingredients(content: &str) -> anyhow::Result<Vec<IngredientInput>> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut ingredients = vec![];
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != 2 {
            anyhow::bail!("line {line}: expected `name,measurement_unit`");
        }

        let ingredient: IngredientInput = record.deserialize(None)?;
        if ingredient.name.is_empty() || ingredient.measurement_unit.is_empty() {
            anyhow::bail!("line {line}: empty name or measurement unit");
        }

        ingredients.push(ingredient);
    }

    Ok(ingredients)
}

impl super::Command {
    /// Replaces the whole ingredient list. Recipe lines pointing at removed
    /// ingredients go with them.
    #[tracing::instrument(skip_all, fields(count = ingredients.len()))]
    pub async fn import_ingredients(
        &self,
        ingredients: Vec<IngredientInput>,
    ) -> foodgram_shared::Result<usize> {
        let mut tx = self.write_db.begin().await?;

        let (sql, values) = Query::delete()
            .from_table(Ingredient::Table)
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        for chunk in ingredients.chunks(300) {
            let mut statement = Query::insert()
                .into_table(Ingredient::Table)
                .columns([Ingredient::Name, Ingredient::MeasurementUnit])
                .to_owned();

            for ingredient in chunk {
                statement.values_panic([
                    ingredient.name.to_owned().into(),
                    ingredient.measurement_unit.to_owned().into(),
                ]);
            }

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        tx.commit().await?;

        tracing::info!("ingredients imported");

        Ok(ingredients.len())
    }
}
