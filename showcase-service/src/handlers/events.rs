use crate::dtos::render_document;
use crate::services::metrics::RECORDS_SERVED;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use service_core::error::AppError;

const LIST_FAILURE: &str = "Error fetching events";

pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let cursor = state.db.raw_events().find(doc! {}, None).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to query events");
        AppError::storage(LIST_FAILURE, e)
    })?;

    let events: Vec<serde_json::Value> = cursor
        .map_ok(render_document)
        .try_collect()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to read events cursor");
            AppError::storage(LIST_FAILURE, e)
        })?;

    metrics::counter!(RECORDS_SERVED, "resource" => "events").increment(events.len() as u64);

    Ok(Json(events))
}
