use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Error type for routes that have no failure modes of their own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl std::error::Error for Nothing {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            error_messages: vec![message.into()],
        }
    }

    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.error_messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.error_messages.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_messages.join(", "))
    }
}

impl std::error::Error for ValidationError {}

pub enum ServerError<T> {
    Inner { code: StatusCode, inner: T },
    Other { message: String },
}

impl<T> ServerError<T> {
    pub fn code(&self) -> StatusCode {
        match self {
            ServerError::Inner { code, .. } => *code,
            ServerError::Other { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<T: fmt::Display> ServerError<T> {
    /// Message sent back to the client. The Debug form is only logged
    pub fn client_message(&self) -> String {
        match self {
            ServerError::Inner { inner, .. } => inner.to_string(),
            ServerError::Other { message } => format!("Something went wrong: {message}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Inner { code, inner } => write!(f, "ServerError {code}: {inner:?}"),
            ServerError::Other { message } => write!(f, "ServerError::Other: {message}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<T: fmt::Debug> std::error::Error for ServerError<T> {}

#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}

#[cfg(feature = "backend")]
mod backend {
    use axum::{
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{InteractError, PoolError};
    use serde_json::json;
    use tracing::error;

    use super::ServerError;

    impl<T> From<rusqlite::Error> for ServerError<T> {
        fn from(err: rusqlite::Error) -> Self {
            Self::Other {
                message: format!("rusqlite: {err}"),
            }
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        fn from(err: InteractError) -> Self {
            Self::Other {
                message: format!("deadpool interact: {err:?}"),
            }
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        fn from(err: PoolError) -> Self {
            Self::Other {
                message: format!("deadpool pool: {err}"),
            }
        }
    }

    // Render ServerError into a json response
    impl<T: std::fmt::Debug + std::fmt::Display> IntoResponse for ServerError<T> {
        fn into_response(self) -> Response {
            let code = self.code();
            if code.is_server_error() {
                error!(?self, "Request failed");
            }

            (code, Json(json!({ "error": self.client_message() }))).into_response()
        }
    }
}

#[cfg(test)]
mod test {
    use http::StatusCode;

    use super::*;

    #[test]
    fn test_other_error_hides_details_behind_500() {
        let err: ServerError<Nothing> = other_error!("disk {}", "on fire");
        assert_eq!(err.code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Something went wrong: disk on fire");
        assert_eq!(format!("{err:?}"), "ServerError::Other: disk on fire");
    }

    #[test]
    fn test_inner_error_keeps_its_code() {
        let err = ServerError::Inner {
            code: StatusCode::BAD_REQUEST,
            inner: ValidationError::new("description is required"),
        };
        assert_eq!(err.code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "description is required");
    }

    #[test]
    fn test_validation_messages_are_joined() {
        let mut err = ValidationError::default();
        assert!(err.is_empty());
        err.push("description is required");
        err.push("duration is required");
        assert!(!err.is_empty());
        assert_eq!(
            err.to_string(),
            "description is required, duration is required"
        );
    }
}
