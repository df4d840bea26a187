use std::sync::LazyLock;

use foodgram_db::table::Tag;
use regex::Regex;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

static RE_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());
static RE_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap());

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(regex(path = *RE_COLOR, message = "Color must be a hex code like #49B64E."))]
    pub color: String,
    #[validate(
        length(max = 200),
        regex(path = *RE_SLUG, message = "Slug may only contain letters, digits, '-' and '_'.")
    )]
    pub slug: String,
}

impl super::Command {
    pub async fn create_tag(&self, input: TagInput) -> foodgram_shared::Result<i64> {
        input.validate()?;

        let (sql, values) = Query::insert()
            .into_table(Tag::Table)
            .columns([Tag::Name, Tag::Color, Tag::Slug])
            .values_panic([
                input.name.into(),
                input.color.to_uppercase().into(),
                input.slug.into(),
            ])
            .build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(result) => Ok(result.last_insert_rowid()),
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                foodgram_shared::field!("slug", "Tag with this slug already exists.")
            }
            Err(err) => Err(err.into()),
        }
    }
}
