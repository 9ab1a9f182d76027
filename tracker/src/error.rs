//! Error handling for the Agrovia tracker
//!
//! The freshness and pricing rules never fail; errors only arise from
//! operations on the batch registry.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Batch {0} has not been quality tested")]
    NotGraded(String),

    #[error("Batch {0} has already been quality tested")]
    AlreadyGraded(String),

    #[error("Batch {0} is expired and cannot be sold")]
    SaleNotAllowed(String),

    #[error("Insufficient inventory for {batch_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        batch_id: String,
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

/// Machine readable error detail
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Stable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } | AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NotGraded(_) => "NOT_GRADED",
            AppError::AlreadyGraded(_) => "ALREADY_GRADED",
            AppError::SaleNotAllowed(_) => "SALE_NOT_ALLOWED",
            AppError::InsufficientInventory { .. } => "INSUFFICIENT_INVENTORY",
            AppError::InvalidStateTransition(_) => "INVALID_STATE_TRANSITION",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        let field = match self {
            AppError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };
        ErrorDetail {
            code: self.code().to_string(),
            message: self.to_string(),
            field,
        }
    }

    /// Wrap a `&'static str` validation message for a named field
    pub fn invalid(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        match field_errors.iter().next() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("invalid {}", field));
                AppError::Validation {
                    field: field.to_string(),
                    message,
                }
            }
            None => AppError::ValidationError(errors.to_string()),
        }
    }
}

/// Result type alias for services
pub type AppResult<T> = Result<T, AppError>;
