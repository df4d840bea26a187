use foodgram_db::table::Recipe;
use foodgram_shared::pagination::{Page, PageArgs};
use sea_query::{Cond, Condition, Expr, ExprTrait, Func, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use super::TagView;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuthorView {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct RecipeIngredientView {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: i64,
    pub tags: Vec<TagView>,
    pub author: AuthorView,
    pub ingredients: Vec<RecipeIngredientView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShortRecipeView {
    pub id: i64,
    pub name: String,
    pub cooking_time: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeImage {
    pub image: Vec<u8>,
    pub image_type: String,
}

#[derive(Debug, Default, Clone)]
pub struct RecipeFilter {
    pub author: Option<i64>,
    /// Tag slugs, a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub is_favorited: Option<bool>,
    pub is_in_shopping_cart: Option<bool>,
}

#[derive(FromRow)]
struct RecipeRow {
    id: i64,
    name: String,
    text: String,
    cooking_time: i64,
    is_favorited: bool,
    is_in_shopping_cart: bool,
    author_id: i64,
    author_email: String,
    author_username: String,
    author_first_name: String,
    author_last_name: String,
    author_is_subscribed: bool,
}

const FIND_RECIPE: &str = r#"
SELECT r.id, r.name, r.text, r.cooking_time,
    EXISTS (SELECT 1 FROM favorite f WHERE f.user_id = ?1 AND f.recipe_id = r.id) AS is_favorited,
    EXISTS (SELECT 1 FROM shopping_cart c WHERE c.user_id = ?1 AND c.recipe_id = r.id) AS is_in_shopping_cart,
    u.id AS author_id, u.email AS author_email, u.username AS author_username,
    u.first_name AS author_first_name, u.last_name AS author_last_name,
    EXISTS (SELECT 1 FROM subscription s WHERE s.user_id = ?1 AND s.author_id = u.id) AS author_is_subscribed
FROM recipe r
JOIN "user" u ON u.id = r.author_id
WHERE r.id = ?2
"#;

const RECIPE_TAGS: &str = r#"
SELECT t.id, t.name, t.color, t.slug
FROM recipe_tag rt
JOIN tag t ON t.id = rt.tag_id
WHERE rt.recipe_id = ?
ORDER BY rt.id
"#;

const RECIPE_INGREDIENTS: &str = r#"
SELECT i.id, i.name, i.measurement_unit, ri.amount
FROM recipe_ingredient ri
JOIN ingredient i ON i.id = ri.ingredient_id
WHERE ri.recipe_id = ?
ORDER BY ri.id
"#;

impl super::Query {
    /// Recipes ordered by name, then id.
    ///
    /// The `is_favorited` and `is_in_shopping_cart` filters only apply to an
    /// authenticated viewer.
    pub async fn filter(
        &self,
        viewer: Option<i64>,
        filter: RecipeFilter,
        args: PageArgs,
    ) -> foodgram_shared::Result<Page<RecipeView>> {
        let condition = filter_condition(viewer, &filter);

        let (sql, values) = SeaQuery::select()
            .expr(Func::count(Expr::col(Recipe::Id)))
            .from(Recipe::Table)
            .cond_where(condition.clone())
            .build_sqlx(SqliteQueryBuilder);

        let count: i64 = sqlx::query_scalar_with(&sql, values)
            .fetch_one(&self.read_db)
            .await?;

        let (sql, values) = SeaQuery::select()
            .column(Recipe::Id)
            .from(Recipe::Table)
            .cond_where(condition)
            .order_by(Recipe::Name, Order::Asc)
            .order_by(Recipe::Id, Order::Asc)
            .limit(u64::from(args.limit))
            .offset(args.offset())
            .build_sqlx(SqliteQueryBuilder);

        let ids: Vec<i64> = sqlx::query_scalar_with(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(recipe) = self.find(viewer, id).await? {
                items.push(recipe);
            }
        }

        Ok(Page {
            count: count as u64,
            items,
            args,
        })
    }

    pub async fn find(
        &self,
        viewer: Option<i64>,
        id: i64,
    ) -> foodgram_shared::Result<Option<RecipeView>> {
        let Some(row) = sqlx::query_as::<_, RecipeRow>(FIND_RECIPE)
            .bind(viewer)
            .bind(id)
            .fetch_optional(&self.read_db)
            .await?
        else {
            return Ok(None);
        };

        let tags = sqlx::query_as::<_, TagView>(RECIPE_TAGS)
            .bind(id)
            .fetch_all(&self.read_db)
            .await?;

        let ingredients = sqlx::query_as::<_, RecipeIngredientView>(RECIPE_INGREDIENTS)
            .bind(id)
            .fetch_all(&self.read_db)
            .await?;

        Ok(Some(RecipeView {
            id: row.id,
            tags,
            author: AuthorView {
                email: row.author_email,
                id: row.author_id,
                username: row.author_username,
                first_name: row.author_first_name,
                last_name: row.author_last_name,
                is_subscribed: row.author_is_subscribed,
            },
            ingredients,
            is_favorited: row.is_favorited,
            is_in_shopping_cart: row.is_in_shopping_cart,
            name: row.name,
            text: row.text,
            cooking_time: row.cooking_time,
        }))
    }

    pub async fn find_short(&self, id: i64) -> foodgram_shared::Result<Option<ShortRecipeView>> {
        let (sql, values) = SeaQuery::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, ShortRecipeView, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    pub async fn image(&self, id: i64) -> foodgram_shared::Result<Option<RecipeImage>> {
        let (sql, values) = SeaQuery::select()
            .columns([Recipe::Image, Recipe::ImageType])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeImage, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}

fn filter_condition(viewer: Option<i64>, filter: &RecipeFilter) -> Condition {
    let mut condition = Cond::all();

    if let Some(author) = filter.author {
        condition = condition.add(Expr::col(Recipe::AuthorId).eq(author));
    }

    if !filter.tags.is_empty() {
        let in_clause = filter
            .tags
            .iter()
            .map(|_| "?")
            .collect::<Vec<_>>()
            .join(", ");

        condition = condition.add(Expr::cust_with_values(
            format!(
                r#"EXISTS (SELECT 1 FROM recipe_tag rt JOIN tag t ON t.id = rt.tag_id WHERE rt.recipe_id = "recipe"."id" AND t.slug IN ({in_clause}))"#
            ),
            filter.tags.iter().map(|slug| slug.to_owned()).collect::<Vec<_>>(),
        ));
    }

    let Some(viewer) = viewer else {
        return condition;
    };

    if let Some(is_favorited) = filter.is_favorited {
        condition = condition.add(relation_exists("favorite", viewer, is_favorited));
    }

    if let Some(is_in_shopping_cart) = filter.is_in_shopping_cart {
        condition = condition.add(relation_exists("shopping_cart", viewer, is_in_shopping_cart));
    }

    condition
}

fn relation_exists(table: &str, viewer: i64, exists: bool) -> Expr {
    let not = if exists { "" } else { "NOT " };

    Expr::cust_with_values(
        format!(
            r#"{not}EXISTS (SELECT 1 FROM {table} x WHERE x.recipe_id = "recipe"."id" AND x.user_id = ?)"#
        ),
        [viewer],
    )
}
