//
//  confluence-client
//  api/confluence/blogposts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Blog post API types and calls.
//!
//! Blog posts are dated, flat content in a space. Unlike pages they have no
//! parent and no children.

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

/// A Confluence blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    #[serde(default)]
    pub status: Option<ContentStatus>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub space_id: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default)]
    pub body: Option<ContentBody>,
    #[serde(default, rename = "_links")]
    pub links: Links,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Filters for `get_blog_posts`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListBlogPostsParams {
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

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBlogPostRequest {
    #[serde(rename = "spaceId")]
    pub space_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyWrite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateBlogPostRequest {
    pub status: ContentStatus,
    pub title: String,
    pub version: VersionUpdate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyWrite>,
    #[serde(rename = "spaceId", skip_serializing_if = "Option::is_none")]
    pub space_id: Option<String>,
}

impl ConfluenceClient {
    pub async fn list_blog_posts(
        &self,
        params: &ListBlogPostsParams,
    ) -> Result<CursorPage<BlogPost>> {
        self.invoke_as("get_blog_posts", Args::from_params(params)?).await
    }

    pub async fn get_blog_post(&self, id: &str, params: &GetContentParams) -> Result<BlogPost> {
        let args = Args::from_params(params)?.set("id", id);
        self.invoke_as("get_blog_post_by_id", args).await
    }

    pub async fn create_blog_post(&self, request: &CreateBlogPostRequest) -> Result<BlogPost> {
        self.invoke_as("create_blog_post", Args::from_params(request)?)
            .await
    }

    /// The id is sent both in the path and in the body.
    pub async fn update_blog_post(
        &self,
        id: &str,
        request: &UpdateBlogPostRequest,
    ) -> Result<BlogPost> {
        let args = Args::from_params(request)?.set("id", id);
        self.invoke_as("update_blog_post", args).await
    }

    pub async fn delete_blog_post(&self, id: &str, params: &DeleteContentParams) -> Result<()> {
        let args = Args::from_params(params)?.set("id", id);
        self.invoke_unit("delete_blog_post", args).await
    }

    pub async fn list_blog_posts_in_space(
        &self,
        space_id: &str,
        params: &SpaceContentParams,
    ) -> Result<CursorPage<BlogPost>> {
        let args = Args::from_params(params)?.set("id", space_id);
        self.invoke_as("get_blog_posts_in_space", args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::registry;
    use crate::api::request::RequestSpec;
    use serde_json::json;

    #[test]
    fn test_update_echoes_id_into_body() {
        let request = UpdateBlogPostRequest {
            status: ContentStatus::Current,
            title: "Week 12".to_string(),
            version: VersionUpdate::new(2),
            body: None,
            space_id: None,
        };
        let args = Args::from_params(&request).unwrap().set("id", "88");
        let op = registry().get("update_blog_post").unwrap();
        let spec = RequestSpec::build(op, &args).unwrap();

        assert_eq!(spec.render_path(), "/blogposts/88");
        assert_eq!(
            spec.body(),
            Some(json!({
                "id": "88",
                "status": "current",
                "title": "Week 12",
                "version": {"number": 2}
            }))
        );
    }
}
