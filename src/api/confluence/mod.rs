//
//  confluence-client
//  api/confluence/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed bindings for the most used Confluence Cloud v2 resources.
//!
//! Every method here is a thin wrapper: it serializes a parameter struct
//! into [`Args`](crate::api::Args) and calls the generic operation
//! interpreter by name. The wrappers add types, not behavior; anything they
//! can do is equally reachable through
//! [`ConfluenceClient::invoke`](crate::api::ConfluenceClient::invoke).
//!
//! # Module Organization
//!
//! - [`pages`] - Pages, including child pages and pages in a space
//! - [`blogposts`] - Blog posts
//! - [`spaces`] - Spaces
//! - [`attachments`] - Attachments on pages and blog posts
//! - [`comments`] - Footer comments
//! - [`properties`] - Content properties on pages
//! - [`classification`] - Data classification levels
//!
//! # Example
//!
//! ```rust,no_run
//! use confluence_client::api::confluence::{BodyFormat, ListPagesParams};
//! use confluence_client::api::ConfluenceClient;
//! use confluence_client::auth::AuthCredential;
//!
//! # async fn example() -> confluence_client::api::Result<()> {
//! let client = ConfluenceClient::new(AuthCredential::bearer("token"))?;
//! let params = ListPagesParams {
//!     space_id: Some(vec![65_538]),
//!     body_format: Some(BodyFormat::Storage),
//!     limit: Some(50),
//!     ..Default::default()
//! };
//! let page = client.list_pages(&params).await?;
//! for p in &page.results {
//!     println!("{} {}", p.id, p.title.as_deref().unwrap_or(""));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - Parameter field names are the argument names of the underlying
//!   operation; unset fields are never sent
//! - Models keep fields they do not name in an `extra` map

pub mod attachments;
pub mod blogposts;
pub mod classification;
pub mod comments;
pub mod pages;
pub mod properties;
pub mod spaces;

pub use attachments::*;
pub use blogposts::*;
pub use classification::*;
pub use comments::*;
pub use pages::*;
pub use properties::*;
pub use spaces::*;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Representation in which content bodies are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    Storage,
    AtlasDocFormat,
    View,
    ExportView,
    AnonymousExportView,
    StyledView,
    Editor,
}

/// Lifecycle status of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Current,
    Draft,
    Archived,
    Historical,
    Trashed,
    Deleted,
    Any,
}

/// Version metadata as returned by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub minor_edit: Option<bool>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Version block sent with updates. `number` must be the current version + 1.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VersionUpdate {
    pub number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VersionUpdate {
    pub fn new(number: i64) -> Self {
        Self {
            number,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Body sent when creating or updating content.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BodyWrite {
    /// `storage`, `atlas_doc_format` or `wiki`.
    pub representation: String,
    pub value: String,
}

impl BodyWrite {
    /// A body in Confluence storage format (XHTML).
    pub fn storage(value: impl Into<String>) -> Self {
        Self {
            representation: "storage".to_string(),
            value: value.into(),
        }
    }
}

/// One representation of a returned body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BodyRepresentation {
    #[serde(default)]
    pub representation: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Returned content body, keyed by the requested format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContentBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<BodyRepresentation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atlas_doc_format: Option<BodyRepresentation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<BodyRepresentation>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Optional parameters shared by the single-page and single-blog-post reads.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetContentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_format: Option<BodyFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<ContentStatus>>,
    /// Specific version to read instead of the latest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_labels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_properties: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_versions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_version: Option<bool>,
}

/// Options for deleting pages and blog posts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeleteContentParams {
    /// Permanently delete already-trashed content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purge: Option<bool>,
    /// Delete a draft rather than the published content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

/// Filters for listing pages or blog posts inside one space.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpaceContentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<ContentStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_format: Option<BodyFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enums_use_wire_spelling() {
        assert_eq!(
            serde_json::to_value(BodyFormat::AtlasDocFormat).unwrap(),
            json!("atlas_doc_format")
        );
        assert_eq!(serde_json::to_value(ContentStatus::Trashed).unwrap(), json!("trashed"));
    }

    #[test]
    fn test_unset_params_serialize_empty() {
        assert_eq!(serde_json::to_value(GetContentParams::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_version_update() {
        let version = VersionUpdate::new(4).with_message("typo");
        assert_eq!(
            serde_json::to_value(version).unwrap(),
            json!({"number": 4, "message": "typo"})
        );
    }
}
