//! Error handling for Beet Guru
//!
//! Every data-provider failure is returned as an [`AppError`]; callers catch
//! it at the call site and surface the `Display` message. Nothing here is
//! allowed to crash a screen.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No verification code found. Please request a new code.")]
    NoVerificationCode,

    #[error("Verification code has expired. Please request a new code.")]
    VerificationCodeExpired,

    #[error("Invalid code. {attempts_remaining} attempts remaining.")]
    InvalidVerificationCode { attempts_remaining: u32 },

    #[error("Too many failed attempts. Please request a new code.")]
    TooManyAttempts,

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("{0} not found")]
    NotFound(String),

    // Business logic errors
    #[error("Cannot delete location that is used in assessments")]
    LocationInUse,

    #[error("Conflict: {message}")]
    Conflict { resource: String, message: String },

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable code for logging and assertions
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NoVerificationCode => "NO_VERIFICATION_CODE",
            AppError::VerificationCodeExpired => "VERIFICATION_CODE_EXPIRED",
            AppError::InvalidVerificationCode { .. } => "INVALID_VERIFICATION_CODE",
            AppError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::LocationInUse => "LOCATION_IN_USE",
            AppError::Conflict { .. } => "CONFLICT",
            AppError::InvalidStateTransition(_) => "INVALID_STATE_TRANSITION",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
