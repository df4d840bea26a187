use crate::repository::{self, FindType};

impl super::Command {
    pub async fn make_staff(&self, email: &str) -> foodgram_shared::Result<i64> {
        let email = super::normalize_email(email);
        let Some(user_row) = repository::find(&self.read_db, FindType::Email(email)).await? else {
            foodgram_shared::not_found!("user");
        };

        if user_row.is_staff {
            return Ok(user_row.id);
        }

        repository::update(
            &self.write_db,
            user_row.id,
            repository::UpdateInput {
                is_staff: Some(true),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!(user_id = user_row.id, email = %user_row.email, "user promoted to staff");

        Ok(user_row.id)
    }
}
