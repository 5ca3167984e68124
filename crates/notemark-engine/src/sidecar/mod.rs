//! # Sidecar Metadata
//!
//! A sidecar is a JSON companion file written next to an exported note. It
//! restores identifiers that a plain-text export cannot carry, most
//! importantly the ids and colors of tags.
//!
//! - **`reader`**: [`parse_sidecar`] validates the shape leniently; a file that
//!   is not a JSON object counts as "no sidecar"
//! - **`enrich`**: [`enrich_with_sidecar`] copies tag ids/colors into a tree
//!
//! Wiki-links are listed in the sidecar but are not enriched; the
//! persistence layer resolves them by target title.

pub mod enrich;
pub mod reader;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::CalloutType;

pub use enrich::{Enriched, enrich_with_sidecar};
pub use reader::{ParsedSidecar, parse_sidecar};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidecar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<SidecarTag>,
    #[serde(default)]
    pub wiki_links: Vec<SidecarWikiLink>,
    #[serde(default)]
    pub callouts: Vec<SidecarCallout>,
    /// Snapshot of the editor schema the tree was exported with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(default)]
    pub custom: Map<String, Value>,
}

impl Sidecar {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarTag {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarWikiLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarCallout {
    #[serde(rename = "type")]
    pub callout_type: CalloutType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}
