//! Repository functions for user directory operations.

use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use super::common::{push_assignments, push_equality_filters};
use crate::{
    models::{
        user::{NewUser, User, UserFields},
        Pagination,
    },
    types::UserId,
};

const USER_COLUMNS: &str = "id, surname, name, patronymic, address, passport_number";

/// Checks whether a user with this passport number is already registered.
pub async fn passport_exists(pool: &PgPool, passport_number: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE passport_number = $1)")
        .bind(passport_number)
        .fetch_one(pool)
        .await
}

/// Checks if a user exists by ID.
pub async fn user_exists(pool: &PgPool, user_id: UserId) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn find_user(pool: &PgPool, user_id: UserId) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
    sqlx::query_as::<_, User>(&query)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Lists one page of users matching every non-empty filter, ordered by id.
pub async fn list_users(
    pool: &PgPool,
    filters: &UserFields,
    pagination: Pagination,
) -> Result<Vec<User>, sqlx::Error> {
    let mut builder: QueryBuilder<'_, Postgres> =
        QueryBuilder::new(format!("SELECT {} FROM users", USER_COLUMNS));
    let mut has_clause = false;
    push_equality_filters(&mut builder, &mut has_clause, &filters.present());
    builder.push(" ORDER BY id LIMIT ");
    builder.push_bind(pagination.limit());
    builder.push(" OFFSET ");
    builder.push_bind(pagination.offset());

    builder.build_query_as::<User>().fetch_all(pool).await
}

/// Counts users matching every non-empty filter.
pub async fn count_users(pool: &PgPool, filters: &UserFields) -> Result<i64, sqlx::Error> {
    let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM users");
    let mut has_clause = false;
    push_equality_filters(&mut builder, &mut has_clause, &filters.present());

    builder.build_query_scalar::<i64>().fetch_one(pool).await
}

pub async fn create_user(pool: &PgPool, user: &NewUser) -> Result<User, sqlx::Error> {
    let query = format!(
        "INSERT INTO users (surname, name, patronymic, address, passport_number) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {}",
        USER_COLUMNS
    );
    sqlx::query_as::<_, User>(&query)
        .bind(&user.surname)
        .bind(&user.name)
        .bind(&user.patronymic)
        .bind(&user.address)
        .bind(&user.passport_number)
        .fetch_one(pool)
        .await
}

/// Writes every non-empty field. Returns `None` when no user has this id.
///
/// Callers must reject an empty field set first; an UPDATE without assignments
/// is not valid SQL.
pub async fn update_user(
    pool: &PgPool,
    user_id: UserId,
    fields: &UserFields,
) -> Result<Option<User>, sqlx::Error> {
    let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE users SET ");
    push_assignments(&mut builder, &fields.present());
    builder.push(" WHERE id = ");
    builder.push_bind(user_id);
    builder.push(format!(" RETURNING {}", USER_COLUMNS));

    builder
        .build_query_as::<User>()
        .fetch_optional(pool)
        .await
}

/// Takes a row lock on the user for the rest of the transaction. Returns `false`
/// when no such user exists. Task inserts referencing the user wait on this lock.
pub async fn lock_user(conn: &mut PgConnection, user_id: UserId) -> Result<bool, sqlx::Error> {
    let locked: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(conn)
        .await?;
    Ok(locked.is_some())
}

/// Deletes the user row. Run inside the same transaction as
/// [`super::task::delete_tasks_for_user`].
pub async fn delete_user_row(conn: &mut PgConnection, user_id: UserId) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
