use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    Validation(String),
    #[error("Invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Value placed in `extensions.code` of a GraphQL error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated(_) | AppError::Token(_) => "UNAUTHENTICATED",
            AppError::NotFound(_) => "USER_NOT_FOUND",
            AppError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            AppError::Validation(_) => "BAD_USER_INPUT",
            AppError::Database(_) | AppError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Whether the message may be shown to API callers as-is.
    pub fn is_public(&self) -> bool {
        !matches!(self, AppError::Database(_) | AppError::Internal(_))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("password hashing failed: {}", e))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("blocking task failed: {}", e))
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        let message = if self.is_public() {
            self.to_string()
        } else {
            log::error!("❌ {}", self);
            "Internal server error".to_string()
        };
        let code = self.code();
        async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_taxonomy() {
        assert_eq!(AppError::Unauthenticated("x".into()).code(), "UNAUTHENTICATED");
        assert_eq!(AppError::NotFound("x".into()).code(), "USER_NOT_FOUND");
        assert_eq!(AppError::InvalidCredentials("x".into()).code(), "INVALID_CREDENTIALS");
        assert_eq!(AppError::Validation("x".into()).code(), "BAD_USER_INPUT");
        assert_eq!(AppError::Database("x".into()).code(), "INTERNAL_SERVER_ERROR");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Database("connection reset by 10.0.0.3".into()).extend();
        assert_eq!(err.message, "Internal server error");

        let err = AppError::NotFound("User not found".into()).extend();
        assert_eq!(err.message, "User not found");
    }
}
