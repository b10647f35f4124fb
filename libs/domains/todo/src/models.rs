use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};
use utoipa::ToSchema;

use crate::filters::Metadata;

/// Recognized item statuses
///
/// Items store the status as plain text; this enum is the source of the
/// accepted values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantNames,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ItemStatus {
    Pending,
    InProgress,
    Completed,
}

/// Item entity - a to-do entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub name: String,
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: String,
    /// One of `pending`, `in-progress`, `completed`
    #[schema(example = "pending")]
    pub status: String,
    /// Free-form tags, order preserved
    #[schema(example = json!(["home", "errand"]))]
    pub mode: Vec<String>,
    /// Optimistic-concurrency counter, starts at 1
    #[schema(example = 1)]
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Unsaved item built from a create request.
    ///
    /// `id`, `version` and `created_at` are placeholders until the
    /// repository assigns them.
    pub fn new(input: CreateItem) -> Self {
        Self {
            id: 0,
            name: input.name,
            description: input.description,
            status: input.status,
            mode: input.mode,
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Overwrite every field the patch supplies.
    pub fn apply(&mut self, patch: UpdateItem) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
    }
}

/// DTO for creating an item
///
/// Missing fields decode as empty so they surface as validation errors
/// rather than decoding errors.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateItem {
    #[serde(default)]
    #[schema(example = "Buy milk")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: String,
    #[serde(default)]
    #[schema(example = "pending")]
    pub status: String,
    #[serde(default)]
    #[schema(example = json!(["home"]))]
    pub mode: Vec<String>,
}

/// DTO for partially updating an item
///
/// Absent fields are left unchanged. `version`, when present, must match
/// the stored version.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(example = "completed")]
    pub status: Option<String>,
    pub mode: Option<Vec<String>>,
    #[schema(example = 1)]
    pub version: Option<i32>,
}

/// Text and tag filters for listing items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    pub name: String,
    pub description: String,
    pub status: String,
    pub mode: Vec<String>,
}

/// `{"items": item}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemEnvelope {
    pub items: Item,
}

/// `{"items": [...], "metadata": {...}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemListEnvelope {
    pub items: Vec<Item>,
    pub metadata: Metadata,
}

/// `{"message": "..."}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageEnvelope {
    #[schema(example = "item successfully deleted")]
    pub message: String,
}
