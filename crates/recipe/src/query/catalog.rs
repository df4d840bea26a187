use foodgram_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct TagView {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct IngredientView {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl super::Query {
    pub async fn tags(&self) -> foodgram_shared::Result<Vec<TagView>> {
        let (sql, values) = SeaQuery::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .order_by(Tag::Name, sea_query::Order::Asc)
            .order_by(Tag::Id, sea_query::Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    pub async fn find_tag(&self, id: i64) -> foodgram_shared::Result<Option<TagView>> {
        let (sql, values) = SeaQuery::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    /// Ingredients ordered by name, optionally restricted to names starting
    /// with `prefix` regardless of case.
    ///
    /// The match runs here rather than in SQLite, whose case folding only
    /// covers ASCII.
    pub async fn ingredients(
        &self,
        prefix: Option<&str>,
    ) -> foodgram_shared::Result<Vec<IngredientView>> {
        let (sql, values) = SeaQuery::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .order_by(Ingredient::Name, sea_query::Order::Asc)
            .order_by(Ingredient::Id, sea_query::Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let ingredients = sqlx::query_as_with::<_, IngredientView, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let Some(prefix) = prefix.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(ingredients);
        };

        let prefix = prefix.to_lowercase();

        Ok(ingredients
            .into_iter()
            .filter(|i| i.name.to_lowercase().starts_with(&prefix))
            .collect())
    }

    pub async fn find_ingredient(&self, id: i64) -> foodgram_shared::Result<Option<IngredientView>> {
        let (sql, values) = SeaQuery::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientView, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}
