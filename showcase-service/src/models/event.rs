use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const EVENT_COLLECTION: &str = "Events";

/// A scheduled or announced event. `(title, day)` is unique per collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    pub title: String,
    pub month: String,
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Event {
    pub fn new(title: String, month: String, day: String) -> Self {
        Self {
            object_id: None,
            title,
            month,
            day,
            location: None,
            time: None,
            description: None,
            registration: None,
            is_active: false,
        }
    }
}
