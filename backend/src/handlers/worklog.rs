use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::common::parse_path_id;
use crate::{
    error::AppError,
    models::effort::UserEffort,
    services::work_log::Period,
    state::AppState,
    types::UserId,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkLogQuery {
    /// RFC 3339 lower bound on task start time (inclusive).
    pub start_period: Option<String>,
    /// RFC 3339 upper bound on task start time (inclusive).
    pub end_period: Option<String>,
}

pub async fn get_work_log(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<WorkLogQuery>,
) -> Result<Json<Vec<UserEffort>>, AppError> {
    let user_id: UserId = parse_path_id(&user_id, "user")?;
    let period = Period::from_raw(query.start_period.as_deref(), query.end_period.as_deref())?;
    let efforts = state.work_log().report(user_id, period).await?;
    Ok(Json(efforts))
}
