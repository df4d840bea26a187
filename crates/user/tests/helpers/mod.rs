use std::{path::PathBuf, str::FromStr};

use foodgram_user::RegisterInput;
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
pub async fn create_user(cmd: &foodgram_user::Command, name: &str) -> anyhow::Result<i64> {
    let ids = create_users(cmd, [name]).await?;

    Ok(ids[0])
}

#[allow(dead_code)]
pub async fn create_users<'a>(
    cmd: &foodgram_user::Command,
    names: impl IntoIterator<Item = &'a str>,
) -> anyhow::Result<Vec<i64>> {
    let mut ids = vec![];
    for name in names {
        let id = cmd
            .register(RegisterInput {
                email: format!("{name}@foodgram.localhost"),
                username: name.to_owned(),
                first_name: "John".to_owned(),
                last_name: "Doe".to_owned(),
                password: "my_password".to_owned(),
            })
            .await?;
        ids.push(id);
    }

    Ok(ids)
}
