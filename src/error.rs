//! Error types and handling for the `AeroCast` service

use thiserror::Error;

/// Main error type for the `AeroCast` service
#[derive(Error, Debug)]
pub enum AeroCastError {
    /// Provider call or response parsing failed; carries the queried
    /// location so the caller can offer a location-specific retry
    #[error("Report acquisition failed for {location}: {message}")]
    Acquisition { location: String, message: String },

    /// Identity provider rejected the request
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Realtime store communication errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl AeroCastError {
    /// Create a new acquisition error for a queried location
    pub fn acquisition<L: Into<String>, S: Into<String>>(location: L, message: S) -> Self {
        Self::Acquisition {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AeroCastError::Acquisition { location, .. } => {
                format!("Cloud sync interrupted for {location}. Atmospheric sensors unreachable.")
            }
            // Identity provider text is surfaced verbatim
            AeroCastError::Auth { message } => message.clone(),
            AeroCastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            AeroCastError::Store { .. } => {
                "Realtime store unreachable. Station data may be stale.".to_string()
            }
            AeroCastError::Config { .. } => {
                "Configuration error. Please check your environment and API key.".to_string()
            }
            AeroCastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
