/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("External API error: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("External API {endpoint} responded with status {status}")]
    UpstreamStatus { endpoint: String, status: u16 },

    #[error("Cache file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No sol with enough photos for {rover} after {attempts} attempts")]
    InsufficientData { rover: String, attempts: u32 },

    #[error("No known max sol for inactive rover {0}")]
    MissingMaxSol(String),

    #[error("Template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    /// Short code used in log lines, mirrors the upstream status buckets
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Upstream(e) => match e.status().map(|s| s.as_u16()) {
                Some(status) => status_code(status),
                None => "UPSTREAM_ERROR",
            },
            AppError::UpstreamStatus { status, .. } => status_code(*status),
            AppError::Io(_) | AppError::Serialization(_) => "PERSISTENCE_ERROR",
            AppError::InsufficientData { .. } => "INSUFFICIENT_DATA",
            AppError::MissingMaxSol(_) => "MISSING_MAX_SOL",
            AppError::Render(_) => "RENDER_ERROR",
        }
    }
}

fn status_code(status: u16) -> &'static str {
    match status {
        403 => "UPSTREAM_403",
        404 => "UPSTREAM_404",
        429 => "UPSTREAM_429",
        500..=599 => "UPSTREAM_5XX",
        _ => "UPSTREAM_ERROR",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.code(), "request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{}: {}", self.code(), self),
        )
            .into_response()
    }
}

/// Type alias for application results
pub type AppResult<T> = Result<T, AppError>;
