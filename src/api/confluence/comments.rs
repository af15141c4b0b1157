//
//  confluence-client
//  api/confluence/comments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Footer comment API types and calls.
//!
//! Footer comments sit below a page, blog post or attachment. Replies point at
//! their parent through `parent_comment_id`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BodyFormat, BodyWrite, ContentBody, ContentStatus, Version, VersionUpdate};
use crate::api::common::{CursorPage, Links, Result};
use crate::api::request::Args;
use crate::api::ConfluenceClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterComment {
    pub id: String,
    #[serde(default)]
    pub status: Option<ContentStatus>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub blog_post_id: Option<String>,
    #[serde(default)]
    pub attachment_id: Option<String>,
    #[serde(default)]
    pub parent_comment_id: Option<String>,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default)]
    pub body: Option<ContentBody>,
    #[serde(default, rename = "_links")]
    pub links: Links,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Paging for `get_footer_comments`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCommentsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_format: Option<BodyFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Paging and status filter for comments on one page or blog post.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentCommentsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<ContentStatus>>,
    #[serde(flatten)]
    pub paging: ListCommentsParams,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GetCommentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_format: Option<BodyFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_properties: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_versions: Option<bool>,
}

/// Body for `create_footer_comment`. Set exactly one container id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateFooterCommentRequest {
    #[serde(rename = "pageId", skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(rename = "blogPostId", skip_serializing_if = "Option::is_none")]
    pub blog_post_id: Option<String>,
    #[serde(rename = "attachmentId", skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<String>,
    #[serde(rename = "parentCommentId", skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyWrite>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateFooterCommentRequest {
    pub version: VersionUpdate,
    pub body: BodyWrite,
}

impl ConfluenceClient {
    pub async fn list_footer_comments(
        &self,
        params: &ListCommentsParams,
    ) -> Result<CursorPage<FooterComment>> {
        self.invoke_as("get_footer_comments", Args::from_params(params)?)
            .await
    }

    pub async fn list_page_footer_comments(
        &self,
        page_id: &str,
        params: &ContentCommentsParams,
    ) -> Result<CursorPage<FooterComment>> {
        let args = Args::from_params(params)?.set("id", page_id);
        self.invoke_as("get_page_footer_comments", args).await
    }

    pub async fn list_blog_post_footer_comments(
        &self,
        blog_post_id: &str,
        params: &ContentCommentsParams,
    ) -> Result<CursorPage<FooterComment>> {
        let args = Args::from_params(params)?.set("id", blog_post_id);
        self.invoke_as("get_blog_post_footer_comments", args).await
    }

    pub async fn get_footer_comment(
        &self,
        comment_id: &str,
        params: &GetCommentParams,
    ) -> Result<FooterComment> {
        let args = Args::from_params(params)?.set("comment_id", comment_id);
        self.invoke_as("get_footer_comment_by_id", args).await
    }

    pub async fn create_footer_comment(
        &self,
        request: &CreateFooterCommentRequest,
    ) -> Result<FooterComment> {
        self.invoke_as("create_footer_comment", Args::from_params(request)?)
            .await
    }

    pub async fn update_footer_comment(
        &self,
        comment_id: &str,
        request: &UpdateFooterCommentRequest,
    ) -> Result<FooterComment> {
        let args = Args::from_params(request)?.set("comment_id", comment_id);
        self.invoke_as("update_footer_comment", args).await
    }

    pub async fn delete_footer_comment(&self, comment_id: &str) -> Result<()> {
        let args = Args::new().set("comment_id", comment_id);
        self.invoke_unit("delete_footer_comment", args).await
    }
}
