//! Migration normalising the `patent` field of technology records.
//!
//! Early records stored `patent` as free text, or not at all. The current
//! schema only admits the five [`PatentStatus`] labels. This migration:
//! 1. Sets `patent` to "Not Filed" where it is missing or null
//! 2. Rewrites legacy spellings that unambiguously name a status
//! 3. Leaves anything else untouched and reports it
//!
//! Enabled with `RUN_MIGRATIONS=true`.

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson};
use service_core::error::AppError;

use crate::{models::PatentStatus, services::MongoDb};

#[derive(Debug, Default)]
pub struct MigrationResult {
    pub missing_set_to_not_filed: u64,
    pub legacy_values_rewritten: u64,
    /// Public `id`s of records whose patent value could not be mapped.
    pub unrecognized: Vec<String>,
}

/// Maps a legacy patent value onto a canonical status.
///
/// Comparison ignores case and surrounding/duplicate whitespace.
pub fn normalize_patent_label(raw: &str) -> Option<PatentStatus> {
    let folded = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if let Some(status) = PatentStatus::ALL
        .into_iter()
        .find(|s| s.as_str().to_lowercase() == folded)
    {
        return Some(status);
    }

    match folded.as_str() {
        "" | "none" | "n/a" => Some(PatentStatus::NotFiled),
        "filed" | "applied" => Some(PatentStatus::ApplicationFiled),
        "pending" | "in examination" => Some(PatentStatus::UnderExamination),
        "abandoned" | "lapsed" => Some(PatentStatus::AbandonedOrLapsed),
        _ => None,
    }
}

/// Brings every technology record's `patent` field to a canonical label.
///
/// Idempotent: records already holding a canonical label are not touched.
pub async fn migrate_patent_status(db: &MongoDb) -> Result<MigrationResult, AppError> {
    tracing::info!("Starting patent status migration");

    let mut result = MigrationResult::default();
    let collection = db.raw_technologies();
    let now = bson::DateTime::from_chrono(Utc::now());

    // Step 1: records written before the field existed
    let missing = collection
        .update_many(
            doc! { "$or": [ { "patent": { "$exists": false } }, { "patent": Bson::Null } ] },
            doc! { "$set": { "patent": PatentStatus::NotFiled.as_str(), "editedAt": now } },
            None,
        )
        .await
        .map_err(AppError::from)?;
    result.missing_set_to_not_filed = missing.modified_count;

    // Step 2: free-text values outside the canonical set
    let canonical: Vec<&str> = PatentStatus::ALL.iter().map(|s| s.as_str()).collect();
    let mut cursor = collection
        .find(doc! { "patent": { "$nin": canonical } }, None)
        .await
        .map_err(AppError::from)?;

    while let Some(record) = cursor.try_next().await.map_err(AppError::from)? {
        let public_id = record.get_str("id").unwrap_or("<no id>").to_string();
        let raw = match record.get("patent") {
            Some(Bson::String(raw)) => raw.clone(),
            other => {
                tracing::warn!(technology_id = %public_id, value = ?other, "Non-string patent value");
                result.unrecognized.push(public_id);
                continue;
            }
        };

        let Some(status) = normalize_patent_label(&raw) else {
            tracing::warn!(technology_id = %public_id, value = %raw, "Unrecognized patent value");
            result.unrecognized.push(public_id);
            continue;
        };

        let Some(object_id) = record.get("_id").cloned() else {
            continue;
        };

        collection
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": { "patent": status.as_str(), "editedAt": now } },
                None,
            )
            .await
            .map_err(AppError::from)?;

        tracing::debug!(technology_id = %public_id, from = %raw, to = %status, "Rewrote patent value");
        result.legacy_values_rewritten += 1;
    }

    tracing::info!(
        missing = result.missing_set_to_not_filed,
        rewritten = result.legacy_values_rewritten,
        unrecognized = result.unrecognized.len(),
        "Patent status migration complete"
    );

    Ok(result)
}
