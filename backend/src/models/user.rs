//! Models that represent users of the time tracker and the payloads that create,
//! filter and update them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{types::UserId, validation::rules::validate_passport_number};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
/// Database representation of a tracked employee.
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    /// Postal address.
    pub address: String,
    /// Passport series and number as supplied at registration; unique.
    pub passport_number: String,
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub address: String,
    pub passport_number: String,
}

/// Identity fields returned by the passport lookup service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct PassportRecord {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub address: String,
}

impl PassportRecord {
    /// Builds the row to insert; the passport number is kept exactly as supplied.
    pub fn into_new_user(self, passport_number: &str) -> NewUser {
        NewUser {
            surname: self.surname,
            name: self.name,
            patronymic: self.patronymic,
            address: self.address,
            passport_number: passport_number.to_string(),
        }
    }
}

/// Passport identifier split into its series and number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassportNumber {
    pub series: String,
    pub number: String,
}

impl PassportNumber {
    /// Parses exactly two whitespace-separated tokens.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut tokens = raw.split_whitespace();
        let series = tokens.next()?;
        let number = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }
        Some(Self {
            series: series.to_string(),
            number: number.to_string(),
        })
    }
}

impl std::fmt::Display for PassportNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.series, self.number)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
/// Payload for registering a user from a passport number.
pub struct AddUserRequest {
    /// Passport series and number, e.g. `1234 567890`.
    #[validate(custom(function = "validate_passport_number"))]
    pub passport_number: String,
}

/// Optional user columns, used both as equality filters when listing and as
/// assignments when updating. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserFields {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub patronymic: Option<String>,
    pub passport_number: Option<String>,
    pub address: Option<String>,
}

impl UserFields {
    /// Returns `(column, value)` pairs for every non-empty field in a fixed column order.
    pub fn present(&self) -> Vec<(&'static str, &str)> {
        [
            ("surname", self.surname.as_deref()),
            ("name", self.name.as_deref()),
            ("patronymic", self.patronymic.as_deref()),
            ("passport_number", self.passport_number.as_deref()),
            ("address", self.address.as_deref()),
        ]
        .into_iter()
        .filter_map(|(column, value)| match value {
            Some(v) if !v.is_empty() => Some((column, v)),
            _ => None,
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present().is_empty()
    }
}
