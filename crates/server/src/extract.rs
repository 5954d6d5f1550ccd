use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;
use shared::api::error::ServerError;

/// A request body sent either as JSON or as an urlencoded form, picked by the
/// `Content-Type` header. Anything that isn't JSON is read as a form
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOrForm<T>(pub T);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

fn rejected(code: StatusCode, message: String) -> ServerError<String> {
    ServerError::Inner {
        code,
        inner: message,
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send + 'static,
{
    type Rejection = ServerError<String>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Ok(JsonOrForm(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Ok(JsonOrForm(payload))
        }
    }
}
