//
//  confluence-client
//  api/confluence/classification.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Data classification levels.
//!
//! Organizations with data classification enabled define a set of levels
//! (e.g. Public, Internal, Confidential). Spaces carry a default level and
//! individual pages can override it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ContentStatus;
use crate::api::common::Result;
use crate::api::request::Args;
use crate::api::ConfluenceClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationLevel {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Position in the organization's ordering, lowest first.
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub guideline: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ConfluenceClient {
    /// Every classification level defined for the organization.
    ///
    /// Not paginated; the server returns a plain array.
    pub async fn list_classification_levels(&self) -> Result<Vec<ClassificationLevel>> {
        self.invoke_as("get_classification_levels", Args::new())
            .await
    }

    pub async fn get_page_classification_level(
        &self,
        page_id: &str,
        status: Option<ContentStatus>,
    ) -> Result<ClassificationLevel> {
        let args = Args::new()
            .set("id", page_id)
            .set_opt("status", status.map(status_value));
        self.invoke_as("get_page_classification_level", args).await
    }

    /// Puts the page's classification level back to the space default.
    pub async fn reset_page_classification_level(
        &self,
        page_id: &str,
        status: ContentStatus,
    ) -> Result<()> {
        let args = Args::new()
            .set("id", page_id)
            .set("status", status_value(status));
        self.invoke_unit("post_page_classification_level", args)
            .await
    }

    pub async fn get_space_default_classification_level(
        &self,
        space_id: &str,
    ) -> Result<ClassificationLevel> {
        let args = Args::new().set("id", space_id);
        self.invoke_as("get_space_default_classification_level", args)
            .await
    }
}

fn status_value(status: ContentStatus) -> Value {
    serde_json::to_value(status).unwrap_or(Value::Null)
}
