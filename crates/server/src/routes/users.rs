use axum::Json;
use shared::api::{
    error::ServerError,
    payloads::{NewUserRequest, UserSummary},
    response_errors::UserLogError,
};
use tracing::instrument;

use super::with_service;
use crate::{db::DatabaseConnection, extract::JsonOrForm, state::Args};

#[instrument(skip_all)]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
) -> Result<Json<Vec<UserSummary>>, ServerError<UserLogError>> {
    let users = with_service(conn, args.log_settings(), |service| service.list_users()).await?;
    Ok(Json(users))
}

#[instrument(skip(conn, args))]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
    JsonOrForm(request): JsonOrForm<NewUserRequest>,
) -> Result<Json<UserSummary>, ServerError<UserLogError>> {
    let user = with_service(conn, args.log_settings(), move |service| service.create_user(request)).await?;
    Ok(Json(user))
}
