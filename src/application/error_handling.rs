// src/application/error_handling.rs
//
// Error mapping for commands
//
// ARCHITECTURE:
// - Maps internal errors to client responses with a transport status
// - Never exposes storage details to the client
// - Logs server-side failures

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    /// HTTP-equivalent status code
    pub status: u16,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Referential integrity violation (409)
    Conflict,

    /// Missing or unknown identity (401)
    Unauthorized,

    /// Authenticated but not allowed (403)
    Forbidden,

    /// Invalid input or invariant violation (422)
    Validation,

    /// Database/persistence error (500)
    Database,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorType {
    pub fn status(self) -> u16 {
        match self {
            ErrorType::NotFound => 404,
            ErrorType::Conflict => 409,
            ErrorType::Unauthorized => 401,
            ErrorType::Forbidden => 403,
            ErrorType::Validation => 422,
            ErrorType::Database | ErrorType::Internal => 500,
        }
    }
}

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            status: error_type.status(),
            message: message.into(),
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound(what) => Self::new(ErrorType::NotFound, "Resource not found", Some(what)),

            AppError::Conflict(reason) => {
                Self::new(ErrorType::Conflict, "Referential integrity failure", Some(reason))
            }

            AppError::Authentication(reason) => {
                Self::new(ErrorType::Unauthorized, "Authentication required", Some(reason))
            }

            AppError::Forbidden(reason) => Self::new(ErrorType::Forbidden, "Access denied", Some(reason)),

            AppError::Validation(reason) => Self::new(ErrorType::Validation, "Invalid data", Some(reason)),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::Validation,
                "Domain validation failed",
                Some(domain_error.to_string()),
            ),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(ErrorType::Internal, "Data serialization failed", None)
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(ErrorType::Internal, "File system operation failed", None)
            }

            AppError::Config(message) => {
                log::error!("Configuration error: {}", message);
                Self::new(ErrorType::Internal, "Configuration error", Some(message))
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message, None)
            }
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        ErrorResponse::from_app_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({}): {}", self.message, self.status, details),
            None => write!(f, "{} ({})", self.message, self.status),
        }
    }
}

/// Helper trait to convert service Results for command callers
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_app_error)
    }
}
