use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::error::{ServerError, ValidationError};

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[error($($message_tt:tt)+)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error($($message_tt)+)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl $name {
            pub fn code(&self) -> StatusCode {
                match self {
                    $( $name::$variant { .. } => $variant_code, )*
                }
            }
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = inner.code();
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(UserLogError {
    #[code(StatusCode::NOT_FOUND)]
    #[error("user {id} not found")]
    NotFound { id: String },
    #[code(StatusCode::BAD_REQUEST)]
    #[error("{}", .error_messages.join(", "))]
    Validation { error_messages: Vec<String> },
    #[code(StatusCode::INTERNAL_SERVER_ERROR)]
    #[error("storage failure: {message}")]
    Persistence { message: String },
});

impl From<ValidationError> for UserLogError {
    fn from(err: ValidationError) -> Self {
        UserLogError::Validation {
            error_messages: err.error_messages,
        }
    }
}

impl UserLogError {
    pub fn not_found<S: Into<String>>(id: S) -> Self {
        UserLogError::NotFound { id: id.into() }
    }

    pub fn persistence<E: std::fmt::Display>(err: E) -> Self {
        UserLogError::Persistence {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(UserLogError::not_found("x").code(), StatusCode::NOT_FOUND);
        assert_eq!(
            UserLogError::from(ValidationError::new("bad")).code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserLogError::persistence("locked").code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_error_wraps_code() {
        let err: ServerError<UserLogError> = UserLogError::not_found("abc").into();
        assert_eq!(err.code(), StatusCode::NOT_FOUND);
        assert_eq!(err.client_message(), "user abc not found");
    }

    #[test]
    fn test_validation_message() {
        let err = UserLogError::Validation {
            error_messages: vec!["description is required".into(), "duration must be positive".into()],
        };
        assert_eq!(
            err.to_string(),
            "description is required, duration must be positive"
        );
    }
}
