use std::ops::Deref;

use foodgram_db::table::Subscription;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository::{self, FindType};

#[derive(Clone)]
pub struct Command(pub(crate) foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub async fn subscribe(&self, user_id: i64, author_id: i64) -> foodgram_shared::Result<()> {
        if repository::find(&self.read_db, FindType::Id(author_id))
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("user");
        }

        if user_id == author_id {
            foodgram_shared::user!("Cannot subscribe to yourself.");
        }

        let statement = Query::insert()
            .into_table(Subscription::Table)
            .columns([
                Subscription::UserId,
                Subscription::AuthorId,
                Subscription::CreatedAt,
            ])
            .values_panic([
                user_id.into(),
                author_id.into(),
                foodgram_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => Ok(()),
            Err(err) if foodgram_shared::is_unique_violation(&err) => {
                foodgram_shared::user!("Already subscribed.")
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> foodgram_shared::Result<()> {
        if repository::find(&self.read_db, FindType::Id(author_id))
            .await?
            .is_none()
        {
            foodgram_shared::not_found!("user");
        }

        let statement = Query::delete()
            .from_table(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            foodgram_shared::user!("Subscription does not exist.");
        }

        Ok(())
    }
}
