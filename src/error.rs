/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 12/5/25
 ******************************************************************************/
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::{fmt, io};

/// Per-request failure returned by the profile fetcher and the media paginator.
///
/// Every variant carries the human-readable message that ends up in the placeholder row.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Unauthorized(String),
    RateLimited(String),
    NotFound(String),
    InvalidResponse(String),
    Timeout(String),
    Transport(String),
    Parse(String),
    Unknown(String),
}

/// Discriminant of [`ApiError`], kept in exported records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiErrorKind {
    Unauthorized,
    RateLimited,
    NotFound,
    InvalidResponse,
    Timeout,
    Transport,
    Parse,
    Unknown,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Revisa tus cookies o autenticación.".to_string())
    }

    pub fn rate_limited() -> Self {
        ApiError::RateLimited("Demasiadas peticiones. Espera un tiempo.".to_string())
    }

    pub fn invalid_response() -> Self {
        ApiError::InvalidResponse("Estructura de respuesta inesperada.".to_string())
    }

    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Unauthorized(_) => ApiErrorKind::Unauthorized,
            ApiError::RateLimited(_) => ApiErrorKind::RateLimited,
            ApiError::NotFound(_) => ApiErrorKind::NotFound,
            ApiError::InvalidResponse(_) => ApiErrorKind::InvalidResponse,
            ApiError::Timeout(_) => ApiErrorKind::Timeout,
            ApiError::Transport(_) => ApiErrorKind::Transport,
            ApiError::Parse(_) => ApiErrorKind::Parse,
            ApiError::Unknown(_) => ApiErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(m)
            | ApiError::RateLimited(m)
            | ApiError::NotFound(m)
            | ApiError::InvalidResponse(m)
            | ApiError::Timeout(m)
            | ApiError::Transport(m)
            | ApiError::Parse(m)
            | ApiError::Unknown(m) => m,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl Display for ApiErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::Unauthorized => "Unauthorized",
            ApiErrorKind::RateLimited => "Rate-limited",
            ApiErrorKind::NotFound => "Not Found",
            ApiErrorKind::InvalidResponse => "Invalid Response",
            ApiErrorKind::Timeout => "Timeout",
            ApiErrorKind::Transport => "Request Error",
            ApiErrorKind::Parse => "JSON Parse Error",
            ApiErrorKind::Unknown => "Unknown Error",
        };
        write!(f, "{}", name)
    }
}

/// Failures that abort a run or an export, as opposed to a single username.
#[derive(Debug)]
pub enum AppError {
    MissingCredentials(String),
    InvalidHeader(String),
    Network(reqwest::Error),
    Io(io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    Task(tokio::task::JoinError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingCredentials(var) => write!(f, "missing credentials: {var} is not set"),
            AppError::InvalidHeader(name) => write!(f, "invalid header value for {name}"),
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Csv(e) => write!(f, "csv error: {e}"),
            AppError::Task(e) => write!(f, "batch task failed: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}
impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}
impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Csv(e)
    }
}
impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Task(e)
    }
}
