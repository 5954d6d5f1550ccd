use axum::{extract::Path, Json};
use shared::api::{
    error::ServerError,
    payloads::{ExerciseAdded, NewExerciseRequest},
    response_errors::UserLogError,
};
use tracing::instrument;

use super::with_service;
use crate::{db::DatabaseConnection, extract::JsonOrForm, state::Args};

#[instrument(skip(conn, args))]
pub async fn add_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    args: Args,
    Path(id): Path<String>,
    JsonOrForm(request): JsonOrForm<NewExerciseRequest>,
) -> Result<Json<ExerciseAdded>, ServerError<UserLogError>> {
    let added = with_service(conn, args.log_settings(), move |service| {
        service.add_exercise(&id, request)
    })
    .await?;

    Ok(Json(added))
}
