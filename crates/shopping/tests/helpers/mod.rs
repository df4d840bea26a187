use std::{path::PathBuf, str::FromStr};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<foodgram_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(foodgram_shared::State::single(pool))
}

#[allow(dead_code)]
pub async fn create_user(state: &foodgram_shared::State, name: &str) -> anyhow::Result<i64> {
    let result = sqlx::query(
        r#"INSERT INTO "user" (email, username, first_name, last_name, password, is_staff, created_at) VALUES (?, ?, 'John', 'Doe', '', 0, 0)"#,
    )
    .bind(format!("{name}@foodgram.localhost"))
    .bind(name)
    .execute(&state.write_db)
    .await?;

    Ok(result.last_insert_rowid())
}

#[allow(dead_code)]
pub async fn create_ingredient(
    state: &foodgram_shared::State,
    name: &str,
    unit: &str,
) -> anyhow::Result<i64> {
    let result = sqlx::query("INSERT INTO ingredient (name, measurement_unit) VALUES (?, ?)")
        .bind(name)
        .bind(unit)
        .execute(&state.write_db)
        .await?;

    Ok(result.last_insert_rowid())
}

#[allow(dead_code)]
pub async fn create_recipe(
    state: &foodgram_shared::State,
    author_id: i64,
    name: &str,
    ingredients: &[(i64, i64)],
) -> anyhow::Result<i64> {
    let id = sqlx::query(
        "INSERT INTO recipe (author_id, name, text, cooking_time, image, image_type, created_at) VALUES (?, ?, 'text', 10, x'00', 'image/png', 0)",
    )
    .bind(author_id)
    .bind(name)
    .execute(&state.write_db)
    .await?
    .last_insert_rowid();

    for (ingredient_id, amount) in ingredients {
        sqlx::query(
            "INSERT INTO recipe_ingredient (recipe_id, ingredient_id, amount) VALUES (?, ?, ?)",
        )
        .bind(id)
        .bind(ingredient_id)
        .bind(amount)
        .execute(&state.write_db)
        .await?;
    }

    Ok(id)
}

#[allow(dead_code)]
pub async fn is_in_cart(
    state: &foodgram_shared::State,
    user_id: i64,
    recipe_id: i64,
) -> anyhow::Result<bool> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM shopping_cart WHERE user_id = ? AND recipe_id = ?")
            .bind(user_id)
            .bind(recipe_id)
            .fetch_one(&state.read_db)
            .await?;

    Ok(count > 0)
}
