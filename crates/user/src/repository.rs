use foodgram_db::table::{AuthToken, User};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub is_staff: bool,
}

pub enum FindType {
    Id(i64),
    Email(String),
    Username(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> foodgram_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([User::Id, User::Email, User::Password, User::IsStaff])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
        FindType::Username(username) => {
            statement.and_where(Expr::col(User::Username).eq(username))
        }
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub struct CreateInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub(crate) async fn create(pool: &SqlitePool, input: CreateInput) -> sqlx::Result<i64> {
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::Password,
            User::IsStaff,
            User::CreatedAt,
        ])
        .values_panic([
            input.email.into(),
            input.username.into(),
            input.first_name.into(),
            input.last_name.into(),
            input.password.into(),
            false.into(),
            foodgram_shared::now().into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.last_insert_rowid())
}

#[derive(Default)]
pub struct UpdateInput {
    pub password: Option<String>,
    pub is_staff: Option<bool>,
}

pub(crate) async fn update(
    pool: &SqlitePool,
    id: i64,
    input: UpdateInput,
) -> foodgram_shared::Result<u64> {
    let mut statement = Query::update()
        .table(User::Table)
        .and_where(Expr::col(User::Id).eq(id))
        .to_owned();

    if let Some(password) = input.password {
        statement.value(User::Password, password);
    }

    if let Some(is_staff) = input.is_staff {
        statement.value(User::IsStaff, is_staff);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}

pub(crate) async fn create_token(
    pool: &SqlitePool,
    id: &str,
    user_id: i64,
) -> foodgram_shared::Result<()> {
    let statement = Query::insert()
        .into_table(AuthToken::Table)
        .columns([AuthToken::Id, AuthToken::UserId, AuthToken::CreatedAt])
        .values_panic([id.into(), user_id.into(), foodgram_shared::now().into()])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn delete_token(pool: &SqlitePool, id: &str) -> foodgram_shared::Result<u64> {
    let statement = Query::delete()
        .from_table(AuthToken::Table)
        .and_where(Expr::col(AuthToken::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}

pub(crate) async fn delete_user_tokens(
    pool: &SqlitePool,
    user_id: i64,
    except: &str,
) -> foodgram_shared::Result<()> {
    let statement = Query::delete()
        .from_table(AuthToken::Table)
        .and_where(Expr::col(AuthToken::UserId).eq(user_id))
        .and_where(Expr::col(AuthToken::Id).ne(except))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
