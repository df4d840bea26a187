use std::path::Path;

use anyhow::{Context, Result};
use foodgram_recipe::catalog::{Command, TagInput, parse_ingredients};

async fn catalog_command(config: &crate::config::Config) -> Result<Command> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(Command(foodgram_shared::State::single(pool)))
}

/// Replaces the ingredient catalog with the content of a CSV or JSON file.
pub async fn load_ingredients(config: crate::config::Config, file: &Path) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let ingredients = parse_ingredients(&content)?;
    let command = catalog_command(&config).await?;
    let count = command.import_ingredients(ingredients).await?;

    tracing::info!("{count} ingredients loaded from {}", file.display());

    Ok(())
}

pub async fn create_tag(config: crate::config::Config, input: TagInput) -> Result<()> {
    let slug = input.slug.to_owned();
    let command = catalog_command(&config).await?;
    let id = command.create_tag(input).await?;

    tracing::info!("tag {slug} created with id {id}");

    Ok(())
}
