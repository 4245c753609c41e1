use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::Instrument;

use crate::models::user::{PassportNumber, PassportRecord};

#[derive(Debug, thiserror::Error)]
pub enum PassportLookupError {
    #[error("passport service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("passport service responded with status {0}")]
    Status(u16),
    #[error("passport service returned an invalid body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Fetches identity fields for a passport from the external registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PassportLookup: Send + Sync {
    async fn lookup(&self, passport: &PassportNumber) -> Result<PassportRecord, PassportLookupError>;
}

/// `GET <base>?passportSerie=<S>&passportNumber=<N>` client.
#[derive(Clone)]
pub struct HttpPassportLookup {
    client: Client,
    base_url: String,
}

impl HttpPassportLookup {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PassportLookupError> {
        let client = Client::builder()
            .user_agent("time-tracker-backend/1.0")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PassportLookup for HttpPassportLookup {
    async fn lookup(&self, passport: &PassportNumber) -> Result<PassportRecord, PassportLookupError> {
        let span = tracing::debug_span!("passport_lookup", series = %passport.series);

        async move {
            let resp = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("passportSerie", passport.series.as_str()),
                    ("passportNumber", passport.number.as_str()),
                ])
                .send()
                .await?;

            let status = resp.status();
            if status != StatusCode::OK {
                return Err(PassportLookupError::Status(status.as_u16()));
            }

            let body = resp.bytes().await?;
            decode_record(&body)
        }
        .instrument(span)
        .await
    }
}

/// Decodes a registry response. Only a JSON object is a record; arrays and
/// scalars are rejected even though serde could map them onto the struct.
pub fn decode_record(body: &[u8]) -> Result<PassportRecord, PassportLookupError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(PassportLookupError::Decode(serde::de::Error::custom(
            "expected a JSON object",
        )));
    }
    Ok(serde_json::from_value(value)?)
}
