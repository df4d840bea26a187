use std::sync::LazyLock;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::repository::{self, FindType};

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username regex"));

#[derive(Validate, Deserialize)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(
        length(min = 1, max = 150),
        regex(
            path = *USERNAME_REGEX,
            message = "Enter a valid username. Letters, digits and @/./+/-/_ only."
        )
    )]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl super::Command {
    #[tracing::instrument(skip_all, fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> foodgram_shared::Result<i64> {
        input.validate()?;

        if input.username.eq_ignore_ascii_case("me") {
            foodgram_shared::field!("username", "Username \"me\" is not allowed.");
        }

        let email = super::normalize_email(&input.email);

        if repository::find(&self.read_db, FindType::Email(email.to_owned()))
            .await?
            .is_some()
        {
            foodgram_shared::field!("email", "A user with that email already exists.");
        }

        if repository::find(&self.read_db, FindType::Username(input.username.to_owned()))
            .await?
            .is_some()
        {
            foodgram_shared::field!("username", "A user with that username already exists.");
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)?
            .to_string();

        let created = repository::create(
            &self.write_db,
            repository::CreateInput {
                email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                password: password_hash,
            },
        )
        .await;

        match created {
            Ok(id) => {
                tracing::info!(user_id = id, "user registered");
                Ok(id)
            }
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                foodgram_shared::user!("A user with that email or username already exists.")
            }
            Err(err) => Err(err.into()),
        }
    }
}
