use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use deadpool_sqlite::{Object, Pool};
use shared::api::error::{Nothing, ServerError};
use tracing::trace;

/// A pooled connection, checked out for the duration of one request.
/// Handlers destructure it and pass the [`Object`] on to `interact`
#[derive(Debug)]
pub struct DatabaseConnection(pub Object);

#[async_trait]
impl<S> FromRequestParts<S> for DatabaseConnection
where
    S: Send + Sync,
    Pool: FromRef<S>,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Pool::from_ref(state);
        let status = pool.status();
        trace!(available = status.available, size = status.size, "Checking out connection");

        // Pool errors become a 500 through ServerError::Other
        Ok(DatabaseConnection(pool.get().await?))
    }
}
