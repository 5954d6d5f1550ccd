use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use deadpool_sqlite::Object as PooledConnection;
use shared::api::{error::ServerError, response_errors::UserLogError, Object};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    db::SqliteUserStore,
    service::{LogSettings, UserLogService},
    AppState,
};

mod ping;
pub use ping::*;

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;

/// Runs `f` against a service built on the pooled connection, off the async
/// runtime
async fn with_service<T, F>(
    conn: PooledConnection,
    settings: LogSettings,
    f: F,
) -> Result<T, ServerError<UserLogError>>
where
    T: Send + 'static,
    F: FnOnce(&mut UserLogService<SqliteUserStore<'_>>) -> Result<T, UserLogError> + Send + 'static,
{
    let result = conn
        .interact(move |conn| {
            let mut service = UserLogService::new(SqliteUserStore::new(conn), settings);
            f(&mut service)
        })
        .await??;

    Ok(result)
}

fn cors_layer(origin: &str) -> Result<CorsLayer, anyhow::Error> {
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::exact(HeaderValue::from_str(origin)?)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// The api routes, with anything else falling through to the assets dir
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let cors = cors_layer(&state.args.cors_origin)?;

    Ok(Router::new()
        .route(Object::Ping.path(), get(ping))
        .route(Object::Users.path(), get(list_users).post(create_user))
        .route(Object::UserExercises.path(), post(add_exercise))
        .route(Object::UserLogs.path(), get(get_log))
        .fallback_service(ServeDir::new(&state.args.assets_dir))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state))
}
