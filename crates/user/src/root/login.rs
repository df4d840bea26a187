use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

use crate::repository::{self, FindType};

#[derive(Validate, Deserialize)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Checks the credentials and opens a new session.
    ///
    /// Returns the user id and the id of the stored token row.
    pub async fn login(&self, input: LoginInput) -> foodgram_shared::Result<(i64, String)> {
        input.validate()?;

        let email = super::normalize_email(&input.email);
        let Some(user_row) = repository::find(&self.read_db, FindType::Email(email)).await? else {
            foodgram_shared::user!("Unable to log in with provided credentials.");
        };

        let parsed_hash = PasswordHash::new(&user_row.password)?;
        if Argon2::default()
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            foodgram_shared::user!("Unable to log in with provided credentials.");
        }

        let access_id = Ulid::new().to_string();
        repository::create_token(&self.write_db, &access_id, user_row.id).await?;

        tracing::info!(user_id = user_row.id, "user logged in");

        Ok((user_row.id, access_id))
    }

    pub async fn logout(&self, access_id: &str) -> foodgram_shared::Result<()> {
        if repository::delete_token(&self.write_db, access_id).await? == 0 {
            foodgram_shared::unauthorized!("Invalid token.");
        }

        Ok(())
    }
}
