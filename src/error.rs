use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("movie not found")]
    NotFound,
    #[error("{0}")]
    Storage(DbErr),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        // A unique index violation can only come from a duplicate title.
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                Self::Validation(format!("duplicate title: {msg}"))
            },
            _ => match err {
                DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => Self::NotFound,
                err => Self::Storage(err),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
