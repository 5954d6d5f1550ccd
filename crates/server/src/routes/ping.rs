use axum::Json;
use serde_json::{json, Value};
use shared::api::error::{Nothing, ServerError};

use crate::db::DatabaseConnection;

/// Liveness check that also proves a pooled connection can reach the database
pub async fn ping(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Value>, ServerError<Nothing>> {
    let users: i64 = conn
        .interact(|conn| conn.query_row("SELECT count(*) FROM user", [], |row| row.get(0)))
        .await??;

    Ok(Json(json!({ "status": "ok", "users": users })))
}
