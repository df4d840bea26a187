use std::ops::Deref;

use foodgram_db::table::Recipe;
use foodgram_shared::pagination::{Page, PageArgs};
use sea_query::{Expr, ExprTrait, Func, Order, Query as SeaQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Clone)]
pub struct Query(pub foodgram_shared::State);

impl Deref for Query {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A user as seen by `viewer`, who may be anonymous.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserView {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuthorRecipe {
    pub id: i64,
    pub name: String,
    pub cooking_time: i64,
}

#[derive(Debug, Clone)]
pub struct SubscriptionView {
    pub user: UserView,
    pub recipes: Vec<AuthorRecipe>,
    pub recipes_count: i64,
}

/// The authenticated principal behind a token.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub user_id: i64,
    pub access_id: String,
    pub is_staff: bool,
}

impl Session {
    pub fn actor(&self) -> foodgram_shared::Actor {
        foodgram_shared::Actor {
            id: self.user_id,
            is_staff: self.is_staff,
        }
    }
}

const USER_VIEW_COLUMNS: &str = r#"u.id, u.email, u.username, u.first_name, u.last_name,
    EXISTS (SELECT 1 FROM subscription s WHERE s.user_id = ? AND s.author_id = u.id) AS is_subscribed"#;

impl Query {
    pub async fn find(
        &self,
        viewer: Option<i64>,
        id: i64,
    ) -> foodgram_shared::Result<Option<UserView>> {
        let sql = format!(r#"SELECT {USER_VIEW_COLUMNS} FROM "user" u WHERE u.id = ?"#);

        Ok(sqlx::query_as::<_, UserView>(&sql)
            .bind(viewer)
            .bind(id)
            .fetch_optional(&self.read_db)
            .await?)
    }

    pub async fn list(
        &self,
        viewer: Option<i64>,
        args: PageArgs,
    ) -> foodgram_shared::Result<Page<UserView>> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user""#)
            .fetch_one(&self.read_db)
            .await?;

        let sql =
            format!(r#"SELECT {USER_VIEW_COLUMNS} FROM "user" u ORDER BY u.id LIMIT ? OFFSET ?"#);

        let items = sqlx::query_as::<_, UserView>(&sql)
            .bind(viewer)
            .bind(i64::from(args.limit))
            .bind(args.offset() as i64)
            .fetch_all(&self.read_db)
            .await?;

        Ok(Page {
            count: count as u64,
            items,
            args,
        })
    }

    /// Authors `user_id` follows, each with a preview of their latest recipes.
    ///
    /// `recipes_limit` caps the preview; `None` returns every recipe.
    pub async fn subscriptions(
        &self,
        user_id: i64,
        args: PageArgs,
        recipes_limit: Option<u32>,
    ) -> foodgram_shared::Result<Page<SubscriptionView>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscription WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.read_db)
            .await?;

        let sql = format!(
            r#"SELECT {USER_VIEW_COLUMNS}
            FROM subscription f JOIN "user" u ON u.id = f.author_id
            WHERE f.user_id = ?
            ORDER BY f.id
            LIMIT ? OFFSET ?"#
        );

        let users = sqlx::query_as::<_, UserView>(&sql)
            .bind(user_id)
            .bind(user_id)
            .bind(i64::from(args.limit))
            .bind(args.offset() as i64)
            .fetch_all(&self.read_db)
            .await?;

        let mut items = Vec::with_capacity(users.len());
        for user in users {
            let recipes = self.author_recipes(user.id, recipes_limit).await?;
            let recipes_count = self.recipes_count(user.id).await?;

            items.push(SubscriptionView {
                user,
                recipes,
                recipes_count,
            });
        }

        Ok(Page {
            count: count as u64,
            items,
            args,
        })
    }

    pub async fn subscription(
        &self,
        user_id: i64,
        author_id: i64,
        recipes_limit: Option<u32>,
    ) -> foodgram_shared::Result<Option<SubscriptionView>> {
        let Some(user) = self.find(Some(user_id), author_id).await? else {
            return Ok(None);
        };

        let recipes = self.author_recipes(author_id, recipes_limit).await?;
        let recipes_count = self.recipes_count(author_id).await?;

        Ok(Some(SubscriptionView {
            user,
            recipes,
            recipes_count,
        }))
    }

    /// Resolves a token id to its session, `None` once logged out.
    pub async fn session(&self, access_id: &str) -> foodgram_shared::Result<Option<Session>> {
        Ok(sqlx::query_as::<_, Session>(
            r#"SELECT t.user_id, t.id AS access_id, u.is_staff
            FROM auth_token t JOIN "user" u ON u.id = t.user_id
            WHERE t.id = ?"#,
        )
        .bind(access_id)
        .fetch_optional(&self.read_db)
        .await?)
    }

    async fn author_recipes(
        &self,
        author_id: i64,
        limit: Option<u32>,
    ) -> foodgram_shared::Result<Vec<AuthorRecipe>> {
        let mut statement = SeaQuery::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .order_by(Recipe::CreatedAt, Order::Desc)
            .order_by(Recipe::Id, Order::Desc)
            .to_owned();

        if let Some(limit) = limit {
            statement.limit(u64::from(limit));
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, AuthorRecipe, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    async fn recipes_count(&self, author_id: i64) -> foodgram_shared::Result<i64> {
        let statement = SeaQuery::select()
            .expr(Func::count(Expr::col(Recipe::Id)))
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_scalar_with(&sql, values)
            .fetch_one(&self.read_db)
            .await?)
    }
}
