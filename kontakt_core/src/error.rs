//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::validation::ContactValidationError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ContactValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Text shown to the visitor. A failed save shows its cause, as the
    /// form always has; other internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.message().to_string(),
            AppError::NotFound(_) => "Stránka nebyla nalezena.".to_string(),
            AppError::StorageRead(_) => {
                "Uložené zprávy se nepodařilo načíst, zpráva nebyla uložena. Zkuste to prosím později."
                    .to_string()
            }
            AppError::StorageWrite(msg) => {
                format!("Chyba při ukládání zprávy na serveru: {}", msg)
            }
            _ => "Chyba serveru. Zkuste to prosím později.".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(_) => {}
            AppError::NotFound(path) => tracing::debug!("Not found: {}", path),
            AppError::StorageRead(msg) => tracing::warn!("Storage read error: {}", msg),
            AppError::StorageWrite(msg) => tracing::error!("Storage write error: {}", msg),
            AppError::Config(err) => tracing::error!("Configuration error: {:?}", err),
            AppError::IoError(err) => tracing::error!("IO error: {:?}", err),
            AppError::JsonError(err) => tracing::error!("JSON error: {:?}", err),
            AppError::Other(err) => tracing::error!("Unexpected error: {:?}", err),
        }

        let status = self.status_code();
        let body = crate::views::error_page(status.as_u16(), &self.user_message());

        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_write_message_includes_cause() {
        let err = AppError::StorageWrite("Permission denied".to_string());
        assert!(err.user_message().contains("Permission denied"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::Other(anyhow::anyhow!("secret path /var/lib/x"));
        assert!(!err.user_message().contains("/var/lib/x"));

        let err = AppError::StorageRead("/var/lib/x/zpravy.json is a list".to_string());
        assert!(!err.user_message().contains("/var/lib/x"));
        assert!(err.user_message().contains("nebyla uložena"));
    }
}
