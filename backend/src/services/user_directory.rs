use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

use super::passport::PassportLookup;
use crate::{
    error::{is_unique_violation, AppError},
    models::{
        user::{AddUserRequest, PassportNumber, User, UserFields},
        PaginatedResponse, Pagination,
    },
    repositories::{task as task_repo, transaction, user as user_repo},
    types::UserId,
};

/// Listing, registration, update and deletion of users.
#[derive(Clone)]
pub struct UserDirectory {
    pool: PgPool,
    passport: Arc<dyn PassportLookup>,
}

impl UserDirectory {
    pub fn new(pool: PgPool, passport: Arc<dyn PassportLookup>) -> Self {
        Self { pool, passport }
    }

    pub async fn list(
        &self,
        filters: &UserFields,
        pagination: Pagination,
    ) -> Result<PaginatedResponse<User>, AppError> {
        let users = user_repo::list_users(&self.pool, filters, pagination).await?;
        let total = user_repo::count_users(&self.pool, filters).await?;
        Ok(PaginatedResponse::new(users, total, pagination))
    }

    /// Registers a user from a passport number, pulling the remaining identity
    /// fields from the passport service. The format check runs before any
    /// store or upstream call.
    pub async fn add(&self, request: AddUserRequest) -> Result<User, AppError> {
        request.validate().inspect_err(|_| {
            tracing::warn!(passport = %request.passport_number, "invalid passport number format");
        })?;
        let passport = PassportNumber::parse(&request.passport_number).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Invalid passport number format: {}",
                request.passport_number
            ))
        })?;
        let passport_number = request.passport_number.as_str();

        if user_repo::passport_exists(&self.pool, passport_number).await? {
            tracing::warn!(passport = %passport_number, "user already exists");
            return Err(passport_conflict(passport_number));
        }

        let record = self.passport.lookup(&passport).await?;

        let user = user_repo::create_user(&self.pool, &record.into_new_user(passport_number))
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    passport_conflict(passport_number)
                } else {
                    e.into()
                }
            })?;

        tracing::info!(user_id = %user.id, passport = %passport_number, "user added");
        Ok(user)
    }

    /// Writes only the non-empty fields of an existing user.
    pub async fn update(&self, user_id: UserId, fields: &UserFields) -> Result<User, AppError> {
        if fields.is_empty() {
            return Err(AppError::BadRequest(
                "At least one field must be provided".to_string(),
            ));
        }

        if let Some(raw) = fields.passport_number.as_deref().filter(|v| !v.is_empty()) {
            if PassportNumber::parse(raw).is_none() {
                return Err(AppError::BadRequest(format!(
                    "Invalid passport number format: {}",
                    raw
                )));
            }
        }

        let Some(current) = user_repo::find_user(&self.pool, user_id).await? else {
            tracing::warn!(%user_id, "user does not exist");
            return Err(user_not_found(user_id));
        };

        let updated = user_repo::update_user(&self.pool, user_id, fields)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Passport number already belongs to another user".into())
                } else {
                    e.into()
                }
            })?
            .ok_or_else(|| user_not_found(user_id))?;

        tracing::info!(
            %user_id,
            passport_changed = current.passport_number != updated.passport_number,
            "user updated"
        );
        Ok(updated)
    }

    /// Deletes the user's tasks and then the user in one transaction. The user
    /// row is locked first so a concurrent task start waits and then fails on
    /// the foreign key instead of breaking the delete.
    pub async fn delete(&self, user_id: UserId) -> Result<(), AppError> {
        let mut tx = transaction::begin_transaction(&self.pool).await?;

        if !user_repo::lock_user(&mut *tx, user_id).await? {
            transaction::rollback_transaction(tx).await?;
            tracing::warn!(%user_id, "user does not exist");
            return Err(user_not_found(user_id));
        }

        let removed_tasks = task_repo::delete_tasks_for_user(&mut *tx, user_id).await?;
        let removed_users = user_repo::delete_user_row(&mut *tx, user_id).await?;

        if removed_users == 0 {
            transaction::rollback_transaction(tx).await?;
            tracing::warn!(%user_id, "user does not exist");
            return Err(user_not_found(user_id));
        }

        transaction::commit_transaction(tx).await?;
        tracing::info!(%user_id, removed_tasks, "user deleted");
        Ok(())
    }
}

fn user_not_found(user_id: UserId) -> AppError {
    AppError::NotFound(format!("User with id {} not found", user_id))
}

fn passport_conflict(passport_number: &str) -> AppError {
    AppError::Conflict(format!(
        "User with passport {} already exists",
        passport_number
    ))
}
