use crate::dtos::render_document;
use crate::services::metrics::RECORDS_SERVED;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use service_core::error::AppError;

const LIST_FAILURE: &str = "Error fetching introductory technology data";
const LOOKUP_FAILURE: &str = "Error fetching technology data";
const NOT_FOUND: &str = "Technology not found";

/// `GET /technologies`: every stored record, in storage order, as stored.
pub async fn list_technologies(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let cursor = state
        .db
        .raw_technologies()
        .find(doc! {}, None)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to query technologies");
            AppError::storage(LIST_FAILURE, e)
        })?;

    let technologies: Vec<serde_json::Value> = cursor
        .map_ok(render_document)
        .try_collect()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to read technologies cursor");
            AppError::storage(LIST_FAILURE, e)
        })?;

    metrics::counter!(RECORDS_SERVED, "resource" => "technologies")
        .increment(technologies.len() as u64);

    Ok(Json(technologies))
}

/// `GET /technologies/:id`: exact match on the public `id` field.
pub async fn get_technology(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(technology_id = %id, "Looking up technology");

    let technology = state
        .db
        .raw_technologies()
        .find_one(doc! { "id": &id }, None)
        .await
        .map_err(|e| {
            tracing::error!(technology_id = %id, error = %e, "Failed to query technology");
            AppError::storage(LOOKUP_FAILURE, e)
        })?
        .ok_or_else(|| {
            tracing::debug!(technology_id = %id, "Technology not found");
            AppError::not_found(NOT_FOUND)
        })?;

    metrics::counter!(RECORDS_SERVED, "resource" => "technologies").increment(1);

    Ok(Json(render_document(technology)))
}
