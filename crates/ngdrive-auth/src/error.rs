use ngdrive_core::AppError;
use thiserror::Error;

/// Authentication operation errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please fill in both fields.")]
    MissingCredentials,

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("A user with this email address has already been registered")]
    EmailTaken,

    #[error("Password should be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Auth provider error: {0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Auth state serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => AppError::InvalidInput(err.to_string()),
            other => AppError::Auth(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_maps_to_invalid_input() {
        let err: AppError = AuthError::MissingCredentials.into();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(err.client_message(), "Please fill in both fields.");
    }

    #[test]
    fn test_provider_error_maps_to_auth() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert!(matches!(err, AppError::Auth(_)));
    }
}
