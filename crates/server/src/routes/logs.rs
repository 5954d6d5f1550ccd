use axum::{
    extract::{Path, Query},
    Json,
};
use shared::api::{
    error::ServerError,
    payloads::{LogQuery, UserLog},
    response_errors::UserLogError,
};
use tracing::instrument;

use super::with_service;
use crate::{db::DatabaseConnection, state::Args};

#[instrument(skip(conn, args))]
pub async fn get_log(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
    Path(id): Path<String>,
    Query(query): Query<LogQuery>,
) -> Result<Json<UserLog>, ServerError<UserLogError>> {
    let log = with_service(conn, args.log_settings(), move |service| {
        service.get_log(&id, &query)
    })
    .await?;

    Ok(Json(log))
}
