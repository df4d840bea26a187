use anyhow::Result;

/// Grants staff permissions to an existing account.
pub async fn make_staff(config: crate::config::Config, email: String) -> Result<()> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let command = foodgram_user::Command::new(foodgram_shared::State::single(pool));

    match command.make_staff(&email).await {
        Ok(id) => tracing::info!("{email} (#{id}) now has staff access"),
        Err(foodgram_shared::Error::NotFound(_)) => tracing::error!("user {email} not found"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
