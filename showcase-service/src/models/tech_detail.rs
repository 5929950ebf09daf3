use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId, Bson};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the collection holding technology records. Differs from the
/// entity name; existing data lives here.
pub const TECH_DETAIL_COLLECTION: &str = "Detailed_tech";

pub const DEFAULT_TRL: i32 = 1;

fn default_trl() -> i32 {
    DEFAULT_TRL
}

/// Older writers stored `trl` as a JS number, which lands in BSON as a
/// double or int64. Whole values in range are accepted as-is.
fn deserialize_trl<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    match Bson::deserialize(deserializer)? {
        Bson::Int32(v) => Ok(v),
        Bson::Int64(v) => {
            i32::try_from(v).map_err(|_| D::Error::custom(format!("trl out of range: {}", v)))
        }
        Bson::Double(v) if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 => {
            Ok(v as i32)
        }
        Bson::Null => Ok(DEFAULT_TRL),
        other => Err(D::Error::custom(format!("invalid trl: {}", other))),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PatentStatus {
    #[serde(rename = "Not Filed")]
    NotFiled,
    #[serde(rename = "Application Filed")]
    ApplicationFiled,
    #[serde(rename = "Under Examination")]
    UnderExamination,
    #[serde(rename = "Granted")]
    Granted,
    #[serde(rename = "Abandoned/Lapsed")]
    AbandonedOrLapsed,
}

impl PatentStatus {
    pub const ALL: [PatentStatus; 5] = [
        PatentStatus::NotFiled,
        PatentStatus::ApplicationFiled,
        PatentStatus::UnderExamination,
        PatentStatus::Granted,
        PatentStatus::AbandonedOrLapsed,
    ];

    /// Stored label.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatentStatus::NotFiled => "Not Filed",
            PatentStatus::ApplicationFiled => "Application Filed",
            PatentStatus::UnderExamination => "Under Examination",
            PatentStatus::Granted => "Granted",
            PatentStatus::AbandonedOrLapsed => "Abandoned/Lapsed",
        }
    }
}

impl fmt::Display for PatentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse: only the exact stored labels are accepted.
impl FromStr for PatentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid patent status: {}", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Innovator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Brochure {
    pub url: String,
    pub original_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBy {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A technology showcase entry as stored in [`TECH_DETAIL_COLLECTION`].
///
/// `id` and `docket` are unique across the collection; that is enforced by
/// the indexes created in `MongoDb::initialize_indexes`, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechDetail {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    pub id: String,
    pub docket: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<CreatedBy>,
    #[serde(default)]
    pub innovators: Vec<Innovator>,
    #[serde(default)]
    pub advantages: Vec<String>,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub related_links: Vec<RelatedLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_specifications: Option<String>,
    #[serde(default = "default_trl", deserialize_with = "deserialize_trl")]
    pub trl: i32,
    #[serde(default)]
    pub spotlight: bool,
    #[serde(default)]
    pub images: Vec<Image>,
    pub patent: PatentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patent_application_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patent_filing_date: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patent_grant_date: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patent_document_url: Option<String>,
    #[serde(default)]
    pub brochures: Vec<Brochure>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub edited_at: DateTime<Utc>,
}

impl TechDetail {
    /// Builds a record with every optional field empty and the stored
    /// defaults applied (`trl = 1`, `spotlight = false`).
    pub fn new(id: String, docket: String, name: String, patent: PatentStatus) -> Self {
        let now = Utc::now();
        Self {
            object_id: None,
            id,
            docket,
            name,
            description: None,
            overview: None,
            detailed_description: None,
            genre: None,
            created_by: None,
            innovators: Vec::new(),
            advantages: Vec::new(),
            applications: Vec::new(),
            use_cases: Vec::new(),
            related_links: Vec::new(),
            technical_specifications: None,
            trl: DEFAULT_TRL,
            spotlight: false,
            images: Vec::new(),
            patent,
            patent_id: None,
            patent_application_number: None,
            patent_filing_date: None,
            patent_grant_date: None,
            patent_document_url: None,
            brochures: Vec::new(),
            created_at: now,
            edited_at: now,
        }
    }
}
