//! Failure taxonomy for a single weather fetch.

use thiserror::Error;

const GENERIC_MESSAGE: &str = "Something went wrong. Please try again later.";

/// Why a fetch produced no report.
///
/// Every failure inside the fetcher ends up as one of these values; nothing
/// is retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The provider answered 404: no location matches the city name.
    #[error("city not found")]
    NotFound,

    /// The provider answered with a non-404 error status.
    #[error("provider error: {0}")]
    Provider(String),

    /// The request went out but no response came back.
    #[error("network error")]
    Network,

    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Message suitable for showing to the person who typed the city.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound => "City not found. Please enter a valid city name.".to_string(),
            Self::Provider(msg) => format!("Error: {msg}"),
            Self::Network => "Network error. Please check your internet connection.".to_string(),
            Self::Unknown(msg) if msg.trim().is_empty() => GENERIC_MESSAGE.to_string(),
            Self::Unknown(msg) => msg.clone(),
        }
    }

    /// True when the user should change the city rather than try again later.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
