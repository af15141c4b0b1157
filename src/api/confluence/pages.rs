//
//  confluence-client
//  api/confluence/pages.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Page API types and calls.
//!
//! Pages are the hierarchical content of a space. Each page belongs to one
//! space and optionally to a parent page.
//!
//! # Example
//!
//! ```rust,no_run
//! use confluence_client::api::confluence::{BodyWrite, CreatePageRequest};
//!
//! let request = CreatePageRequest {
//!     space_id: "65538".to_string(),
//!     title: Some("Release notes".to_string()),
//!     body: Some(BodyWrite::storage("<p>Shipped.</p>")),
//!     ..Default::default()
//! };
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    BodyFormat, BodyWrite, ContentBody, ContentStatus, DeleteContentParams, GetContentParams,
    SpaceContentParams, Version, VersionUpdate,
};
use crate::api::common::{CursorPage, Links, Result};
use crate::api::request::Args;
use crate::api::ConfluenceClient;

/// A Confluence page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,

    #[serde(default)]
    pub status: Option<ContentStatus>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub space_id: Option<String>,

    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub author_id: Option<String>,

    #[serde(default)]
    pub owner_id: Option<String>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub version: Option<Version>,

    /// Present only when a `body_format` was requested.
    #[serde(default)]
    pub body: Option<ContentBody>,

    #[serde(default, rename = "_links")]
    pub links: Links,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Filters for `get_pages`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPagesParams {
    /// Restrict to these page ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_id: Option<Vec<i64>>,
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

/// Filters for pages in one space.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SpacePagesParams {
    /// `all` or `root`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,
    #[serde(flatten)]
    pub content: SpaceContentParams,
}

/// Paging for child pages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChildPagesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Body and options for `create_page`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePageRequest {
    #[serde(rename = "spaceId")]
    pub space_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyWrite>,
    /// Create the page as private to the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Create the page at the space root instead of under the homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_level: Option<bool>,
}

/// Body for `update_page`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePageRequest {
    pub status: ContentStatus,
    pub title: String,
    pub version: VersionUpdate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyWrite>,
    #[serde(rename = "spaceId", skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "ownerId", skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl ConfluenceClient {
    /// Lists pages across all spaces visible to the caller. One page of results.
    pub async fn list_pages(&self, params: &ListPagesParams) -> Result<CursorPage<Page>> {
        self.invoke_as("get_pages", Args::from_params(params)?).await
    }

    /// Reads a single page.
    pub async fn get_page(&self, id: &str, params: &GetContentParams) -> Result<Page> {
        let args = Args::from_params(params)?.set("id", id);
        self.invoke_as("get_page_by_id", args).await
    }

    pub async fn create_page(&self, request: &CreatePageRequest) -> Result<Page> {
        self.invoke_as("create_page", Args::from_params(request)?).await
    }

    /// Replaces a page's title, status and body.
    ///
    /// The id is sent both in the path and in the body.
    pub async fn update_page(&self, id: &str, request: &UpdatePageRequest) -> Result<Page> {
        let args = Args::from_params(request)?.set("id", id);
        self.invoke_as("update_page", args).await
    }

    /// Moves a page to the trash, or purges it with `purge`.
    pub async fn delete_page(&self, id: &str, params: &DeleteContentParams) -> Result<()> {
        let args = Args::from_params(params)?.set("id", id);
        self.invoke_unit("delete_page", args).await
    }

    pub async fn list_pages_in_space(
        &self,
        space_id: &str,
        params: &SpacePagesParams,
    ) -> Result<CursorPage<Page>> {
        let args = Args::from_params(params)?.set("id", space_id);
        self.invoke_as("get_pages_in_space", args).await
    }

    /// Direct children of a page.
    pub async fn list_child_pages(
        &self,
        id: &str,
        params: &ChildPagesParams,
    ) -> Result<CursorPage<Page>> {
        let args = Args::from_params(params)?.set("id", id);
        self.invoke_as("get_child_pages", args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::registry;
    use crate::api::request::RequestSpec;
    use serde_json::json;

    #[test]
    fn test_page_keeps_unknown_fields() {
        let page: Page = serde_json::from_value(json!({
            "id": "123",
            "status": "current",
            "title": "Home",
            "spaceId": "65538",
            "version": {"number": 3, "minorEdit": false},
            "_links": {"webui": "/spaces/ENG/pages/123"},
            "lastOwnerId": "abc"
        }))
        .unwrap();

        assert_eq!(page.space_id.as_deref(), Some("65538"));
        assert_eq!(page.version.and_then(|v| v.number), Some(3));
        assert_eq!(page.links.webui.as_deref(), Some("/spaces/ENG/pages/123"));
        assert_eq!(page.extra.get("lastOwnerId"), Some(&json!("abc")));
    }

    #[test]
    fn test_space_pages_params_flatten() {
        let params = SpacePagesParams {
            depth: Some("root".to_string()),
            content: SpaceContentParams {
                limit: Some(10),
                ..Default::default()
            },
        };
        let args = Args::from_params(&params).unwrap().set("id", "7");
        let op = registry().get("get_pages_in_space").unwrap();
        let spec = RequestSpec::build(op, &args).unwrap();
        assert_eq!(spec.render_path(), "/spaces/7/pages");
        assert_eq!(
            spec.query_pairs(),
            vec![
                ("depth".to_string(), "root".to_string()),
                ("limit".to_string(), "10".to_string())
            ]
        );
    }

    #[test]
    fn test_create_request_splits_query_and_body() {
        let request = CreatePageRequest {
            space_id: "1".to_string(),
            title: Some("T".to_string()),
            root_level: Some(true),
            ..Default::default()
        };
        let op = registry().get("create_page").unwrap();
        let spec = RequestSpec::build(op, &Args::from_params(&request).unwrap()).unwrap();
        assert_eq!(spec.body(), Some(json!({"spaceId": "1", "title": "T"})));
        assert_eq!(
            spec.query_pairs(),
            vec![("root-level".to_string(), "true".to_string())]
        );
    }
}
