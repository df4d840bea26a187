use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use validator::Validate;

use crate::repository::{self, FindType};

#[derive(Validate, Deserialize)]
pub struct SetPasswordInput {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

impl super::Command {
    /// Replaces the password and closes every other session of the user.
    pub async fn set_password(
        &self,
        id: i64,
        access_id: &str,
        input: SetPasswordInput,
    ) -> foodgram_shared::Result<()> {
        input.validate()?;

        let Some(user_row) = repository::find(&self.read_db, FindType::Id(id)).await? else {
            foodgram_shared::not_found!("user");
        };

        let parsed_hash = PasswordHash::new(&user_row.password)?;
        let argon2 = Argon2::default();

        if argon2
            .verify_password(input.current_password.as_bytes(), &parsed_hash)
            .is_err()
        {
            foodgram_shared::field!("current_password", "Invalid password.");
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = argon2
            .hash_password(input.new_password.as_bytes(), &salt)?
            .to_string();

        repository::update(
            &self.write_db,
            id,
            repository::UpdateInput {
                password: Some(password_hash),
                ..Default::default()
            },
        )
        .await?;

        repository::delete_user_tokens(&self.write_db, id, access_id).await?;

        Ok(())
    }
}
