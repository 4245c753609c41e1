use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::common::parse_path_id;
use crate::{
    error::AppError,
    models::{
        user::{AddUserRequest, User, UserFields},
        PaginatedResponse, Pagination,
    },
    state::AppState,
    types::UserId,
};

/// Query string of `GET /users`. Page values stay raw strings so that
/// non-numeric input falls back to defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub surname: Option<String>,
    pub name: Option<String>,
    pub patronymic: Option<String>,
    pub passport_number: Option<String>,
    pub address: Option<String>,
}

impl UserListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_raw(self.page.as_deref(), self.page_size.as_deref())
    }

    pub fn filters(&self) -> UserFields {
        UserFields {
            surname: self.surname.clone(),
            name: self.name.clone(),
            patronymic: self.patronymic.clone(),
            passport_number: self.passport_number.clone(),
            address: self.address.clone(),
        }
    }
}

pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<PaginatedResponse<User>>, AppError> {
    let page = state
        .user_directory()
        .list(&query.filters(), query.pagination())
        .await?;
    Ok(Json(page))
}

pub async fn add_user(
    State(state): State<AppState>,
    Json(payload): Json<AddUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.user_directory().add(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(fields): Query<UserFields>,
) -> Result<Json<User>, AppError> {
    let user_id: UserId = parse_path_id(&user_id, "user")?;
    let user = state.user_directory().update(user_id, &fields).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<&'static str, AppError> {
    let user_id: UserId = parse_path_id(&user_id, "user")?;
    state.user_directory().delete(user_id).await?;
    Ok("User deleted")
}
