//
//  confluence-client
//  api/confluence/attachments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Attachment API types and calls.
//!
//! Uploading is not part of the v2 API; these calls read and delete
//! attachment metadata. File content is fetched from `download_link`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ContentStatus, Version};
use crate::api::common::{CursorPage, Links, Result};
use crate::api::request::Args;
use crate::api::ConfluenceClient;

/// Attachment metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    #[serde(default)]
    pub status: Option<ContentStatus>,
    /// File name.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub blog_post_id: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub webui_link: Option<String>,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default, rename = "_links")]
    pub links: Links,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Filters shared by every attachment listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListAttachmentsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<ContentStatus>>,
    #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAttachmentParams {
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

impl ConfluenceClient {
    pub async fn list_attachments(
        &self,
        params: &ListAttachmentsParams,
    ) -> Result<CursorPage<Attachment>> {
        self.invoke_as("get_attachments", Args::from_params(params)?)
            .await
    }

    pub async fn list_page_attachments(
        &self,
        page_id: &str,
        params: &ListAttachmentsParams,
    ) -> Result<CursorPage<Attachment>> {
        let args = Args::from_params(params)?.set("id", page_id);
        self.invoke_as("get_page_attachments", args).await
    }

    pub async fn list_blog_post_attachments(
        &self,
        blog_post_id: &str,
        params: &ListAttachmentsParams,
    ) -> Result<CursorPage<Attachment>> {
        let args = Args::from_params(params)?.set("id", blog_post_id);
        self.invoke_as("get_blogpost_attachments", args).await
    }

    pub async fn get_attachment(&self, id: &str, params: &GetAttachmentParams) -> Result<Attachment> {
        let args = Args::from_params(params)?.set("id", id);
        self.invoke_as("get_attachment_by_id", args).await
    }

    /// Trashes an attachment; `purge` removes a trashed one for good.
    pub async fn delete_attachment(&self, id: &str, purge: Option<bool>) -> Result<()> {
        let args = Args::new().set("id", id).set_opt("purge", purge);
        self.invoke_unit("delete_attachment", args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_type_is_camel_case_on_the_wire() {
        let params = ListAttachmentsParams {
            media_type: Some("image/png".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"mediaType": "image/png"})
        );
    }

    #[test]
    fn test_attachment_deserializes() {
        let attachment: Attachment = serde_json::from_value(json!({
            "id": "att1",
            "title": "diagram.png",
            "mediaType": "image/png",
            "fileSize": 2048,
            "pageId": "123",
            "downloadLink": "/download/attachments/123/diagram.png"
        }))
        .unwrap();
        assert_eq!(attachment.file_size, Some(2048));
        assert_eq!(attachment.page_id.as_deref(), Some("123"));
    }
}
