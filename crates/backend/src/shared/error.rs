use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use contracts::shared::error_response::ErrorResponse;
use thiserror::Error;

/// Ошибки чтения и выгрузки книги
#[derive(Debug, Error)]
pub enum SheetsError {
    /// The host could not be reached or refused access
    #[error("Host access error: {0}")]
    HostAccess(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Failed to parse sheet '{sheet}': {message}")]
    Parse { sheet: String, message: String },

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SheetsError {
    pub fn host_access(context: &str, err: impl std::fmt::Display) -> Self {
        SheetsError::HostAccess(format!("{context}: {err}"))
    }

    pub fn parse(sheet: &str, err: impl std::fmt::Display) -> Self {
        SheetsError::Parse {
            sheet: sheet.to_string(),
            message: err.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SheetsError::HostAccess(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SheetsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let payload = ErrorResponse::new(self.to_string());
        let body = serde_json::to_string_pretty(&payload)
            .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string());

        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }
}
