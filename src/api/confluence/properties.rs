//
//  confluence-client
//  api/confluence/properties.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content property API types and calls (pages).
//!
//! Content properties are small JSON documents stored against a page under a
//! key, used by apps and automation to keep state next to content.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Version, VersionUpdate};
use crate::api::common::{CursorPage, Result};
use crate::api::request::Args;
use crate::api::ConfluenceClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentProperty {
    pub id: String,
    pub key: String,
    /// Arbitrary JSON.
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPropertiesParams {
    /// Return only the property with this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePropertyRequest {
    pub key: String,
    pub value: Value,
    pub version: VersionUpdate,
}

impl ConfluenceClient {
    pub async fn list_page_properties(
        &self,
        page_id: &str,
        params: &ListPropertiesParams,
    ) -> Result<CursorPage<ContentProperty>> {
        let args = Args::from_params(params)?.set("page_id", page_id);
        self.invoke_as("get_page_content_properties", args).await
    }

    pub async fn get_page_property(
        &self,
        page_id: &str,
        property_id: &str,
    ) -> Result<ContentProperty> {
        let args = Args::new()
            .set("page_id", page_id)
            .set("property_id", property_id);
        self.invoke_as("get_page_content_properties_by_id", args)
            .await
    }

    pub async fn create_page_property(
        &self,
        page_id: &str,
        key: &str,
        value: Value,
    ) -> Result<ContentProperty> {
        let args = Args::new()
            .set("page_id", page_id)
            .set("key", key)
            .set("value", value);
        self.invoke_as("create_page_property", args).await
    }

    pub async fn update_page_property(
        &self,
        page_id: &str,
        property_id: &str,
        request: &UpdatePropertyRequest,
    ) -> Result<ContentProperty> {
        let args = Args::from_params(request)?
            .set("page_id", page_id)
            .set("property_id", property_id);
        self.invoke_as("update_page_property_by_id", args).await
    }

    pub async fn delete_page_property(&self, page_id: &str, property_id: &str) -> Result<()> {
        let args = Args::new()
            .set("page_id", page_id)
            .set("property_id", property_id);
        self.invoke_unit("delete_page_property_by_id", args).await
    }
}
