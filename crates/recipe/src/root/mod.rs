use std::{collections::HashSet, ops::Deref};

use foodgram_db::table::{Ingredient, Recipe, RecipeIngredient, RecipeTag, Tag};
use sea_query::{Expr, ExprTrait, Func, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};
use validator::Validate;

use crate::DataImage;

mod create;
mod delete;
mod update;

#[derive(Clone)]
pub struct Command {
    state: foodgram_shared::State,
    pub favorite: crate::favorite::Command,
}

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: foodgram_shared::State) -> Self {
        Self {
            favorite: crate::favorite::Command(state.clone()),
            state,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IngredientAmount {
    pub id: i64,
    #[validate(range(min = 1, max = 2147483647, message = "Amount must be between 1 and 2147483647."))]
    pub amount: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, message = "At least one ingredient is required."), nested)]
    pub ingredients: Vec<IngredientAmount>,
    #[validate(length(min = 1, message = "At least one tag is required."))]
    pub tags: Vec<i64>,
    pub image: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1, message = "Cooking time must be at least 1 minute."))]
    pub cooking_time: i64,
}

#[derive(FromRow)]
pub(crate) struct RecipeOwner {
    pub author_id: i64,
}

pub(crate) async fn find_owner(
    pool: &SqlitePool,
    id: i64,
) -> foodgram_shared::Result<Option<RecipeOwner>> {
    let (sql, values) = Query::select()
        .column(Recipe::AuthorId)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .limit(1)
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeOwner, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

impl Command {
    /// Field checks that need the database: ingredient and tag references
    /// must be unique and exist, and the image must decode.
    async fn check_input(&self, input: &RecipeInput) -> foodgram_shared::Result<Option<DataImage>> {
        input.validate()?;

        let ingredient_ids = input.ingredients.iter().map(|i| i.id).collect::<Vec<_>>();
        if ingredient_ids.iter().collect::<HashSet<_>>().len() != ingredient_ids.len() {
            foodgram_shared::field!("ingredients", "Ingredients must be unique.");
        }

        if count_existing(&self.read_db, Ingredient::Table, Ingredient::Id, &ingredient_ids).await?
            != ingredient_ids.len() as i64
        {
            foodgram_shared::field!("ingredients", "Ingredient does not exist.");
        }

        if input.tags.iter().collect::<HashSet<_>>().len() != input.tags.len() {
            foodgram_shared::field!("tags", "Tags must be unique.");
        }

        if count_existing(&self.read_db, Tag::Table, Tag::Id, &input.tags).await?
            != input.tags.len() as i64
        {
            foodgram_shared::field!("tags", "Tag does not exist.");
        }

        let Some(image) = input.image.as_deref() else {
            return Ok(None);
        };

        let Some(image) = DataImage::parse(image) else {
            foodgram_shared::field!("image", "Upload a valid image.");
        };

        Ok(Some(image))
    }
}

async fn count_existing<T, C>(
    pool: &SqlitePool,
    table: T,
    column: C,
    ids: &[i64],
) -> foodgram_shared::Result<i64>
where
    T: sea_query::IntoIden,
    C: sea_query::IntoIden + Copy,
{
    let (sql, values) = Query::select()
        .expr(Func::count(Expr::col(column)))
        .from(table)
        .and_where(Expr::col(column).is_in(ids.iter().copied()))
        .build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_scalar_with(&sql, values)
        .fetch_one(pool)
        .await?)
}

/// Inserts the tag and ingredient rows of a recipe.
async fn insert_relations(
    conn: &mut SqliteConnection,
    recipe_id: i64,
    input: &RecipeInput,
) -> foodgram_shared::Result<()> {
    let mut statement = Query::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();

    for tag_id in &input.tags {
        statement.values_panic([recipe_id.into(), (*tag_id).into()]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    let mut statement = Query::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Amount,
        ])
        .to_owned();

    for line in &input.ingredients {
        statement.values_panic([recipe_id.into(), line.id.into(), line.amount.into()]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}
