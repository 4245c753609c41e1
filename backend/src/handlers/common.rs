use std::str::FromStr;

use crate::error::AppError;

/// Parses a path segment into a typed id, rejecting non-numeric and
/// non-positive values.
pub fn parse_path_id<T: FromStr>(raw: &str, label: &str) -> Result<T, AppError> {
    raw.parse::<T>().map_err(|_| {
        tracing::warn!(label, value = raw, "invalid path id");
        AppError::BadRequest(format!("Invalid {} ID: {}", label, raw))
    })
}
