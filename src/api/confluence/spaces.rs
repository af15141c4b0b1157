//
//  confluence-client
//  api/confluence/spaces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Space API types and calls.
//!
//! Spaces group pages and blog posts. Every space has a numeric id and a
//! short, unique key (e.g. `ENG`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{CursorPage, Links, Result};
use crate::api::request::Args;
use crate::api::ConfluenceClient;

/// A Confluence space.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// `global`, `personal`, ...
    #[serde(default, rename = "type")]
    pub space_type: Option<String>,

    /// `current` or `archived`.
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub author_id: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub homepage_id: Option<String>,

    /// Present when a `description_format` was requested.
    #[serde(default)]
    pub description: Option<Value>,

    #[serde(default, rename = "_links")]
    pub links: Links,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Filters for `get_spaces`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListSpacesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Account id whose favourites to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorited_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_favorited_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// `plain` or `view`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_icon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetSpaceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_icon: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_operations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_properties: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_permissions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_labels: Option<bool>,
}

/// Plain-text description sent with `create_space`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SpaceDescription {
    pub value: String,
    pub representation: String,
}

impl SpaceDescription {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            representation: "plain".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateSpaceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<SpaceDescription>,
}

impl ConfluenceClient {
    pub async fn list_spaces(&self, params: &ListSpacesParams) -> Result<CursorPage<Space>> {
        self.invoke_as("get_spaces", Args::from_params(params)?).await
    }

    pub async fn get_space(&self, id: &str, params: &GetSpaceParams) -> Result<Space> {
        let args = Args::from_params(params)?.set("id", id);
        self.invoke_as("get_space_by_id", args).await
    }

    pub async fn create_space(&self, request: &CreateSpaceRequest) -> Result<Space> {
        self.invoke_as("create_space", Args::from_params(request)?).await
    }
}
