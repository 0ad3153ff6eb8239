use reqwest::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Session store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("Session store is corrupt: {0}")]
    StoreFormat(#[from] serde_json::Error),
}

impl ClientError {
    /// Text to show the user: the server's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ClientError::Api {
            status: StatusCode::BAD_REQUEST,
            message: Some("User already exists".into()),
        };
        assert_eq!(err.user_message("Registration failed. Try again."), "User already exists");
        assert_eq!(err.to_string(), "API returned 400 Bad Request: User already exists");

        let err = ClientError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.user_message("Failed to add book"), "Failed to add book");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));

        assert_eq!(
            ClientError::Unauthenticated.user_message("Login failed. Please try again."),
            "Login failed. Please try again."
        );
    }
}
