// --- File: crates/donation_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all donation crates.
///
/// Provider crates implement `From<TheirError> for DonationError`. The
/// `Display` output of the validation and provider variants is the bare
/// message, because that text is what callers receive in `{ "error": ... }`.
#[derive(Error, Debug)]
pub enum DonationError {
    /// The donor's input was missing or malformed.
    #[error("{0}")]
    ValidationError(String),

    /// The payment provider call failed (network, rejected params, provider-side error).
    #[error("{message}")]
    ProviderError {
        service_name: String,
        message: String,
    },

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for DonationError {
    fn status_code(&self) -> u16 {
        match self {
            DonationError::ValidationError(_) => 400,
            // Provider failures are reported as plain server errors, not 502.
            DonationError::ProviderError { .. } => 500,
            DonationError::ConfigError(_) => 500,
            DonationError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> DonationError {
    DonationError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> DonationError {
    DonationError::ValidationError(message.to_string())
}

pub fn provider_error<T: fmt::Display>(service_name: &str, message: T) -> DonationError {
    DonationError::ProviderError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> DonationError {
    DonationError::InternalError(message.to_string())
}
