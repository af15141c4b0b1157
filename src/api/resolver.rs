//
//  confluence-client
//  api/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Tenant Resource Resolution
//!
//! OAuth credentials for Confluence Cloud are issued against the provider's
//! gateway, not against a particular site. Before any operation can be
//! addressed, the client asks the gateway which cloud resources the
//! credentials can reach and derives the tenant-scoped API root from the
//! first one:
//!
//! ```text
//! GET https://api.atlassian.com/oauth/token/accessible-resources
//!   -> [{"id": "abc123", "name": "...", "url": "https://x.atlassian.net", ...}, ...]
//!
//! ApiRoot = https://api.atlassian.com/ex/confluence/abc123/api/v2
//! ```
//!
//! Resolution is split in two parts:
//!
//! - [`resolve_api_root`] performs discovery and nothing else. No caching.
//! - [`ResourceResolver`] owns the cache cell. It resolves at most once per
//!   successful discovery and accepts an explicit override.
//!
//! ## Tenant Selection
//!
//! When credentials reach several sites, the first resource in discovery
//! order wins. There is no disambiguation.

use std::fmt;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::common::{ApiError, Result};
use super::operations::HttpMethod;
use super::transport::{HttpRequest, Transport};
use crate::auth::CredentialProvider;

/// Default provider gateway serving discovery and tenant roots.
pub const DEFAULT_GATEWAY_URL: &str = "https://api.atlassian.com";

/// Path of the discovery endpoint, relative to the gateway.
const DISCOVERY_PATH: &str = "/oauth/token/accessible-resources";

/// One entry of the discovery response.
///
/// Only `id` is consumed; the remaining metadata is kept for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AccessibleResource {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Site URL, e.g. `https://example.atlassian.net`.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub scopes: Vec<String>,

    #[serde(default, rename = "avatarUrl")]
    pub avatar_url: Option<String>,
}

/// Tenant-scoped base URL every operation path is appended to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiRoot(String);

impl ApiRoot {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ApiRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ApiRoot {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ApiRoot {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The provider gateway: where discovery lives and tenant roots hang off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    base: String,
}

impl Gateway {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `<gateway>/oauth/token/accessible-resources`
    pub fn discovery_url(&self) -> Result<Url> {
        let raw = format!("{}{}", self.base, DISCOVERY_PATH);
        Url::parse(&raw).map_err(|e| {
            ApiError::Configuration(format!("gateway URL '{}' is invalid: {}", self.base, e))
        })
    }

    /// `<gateway>/ex/confluence/<resource id>/api/v2`
    pub fn api_root_for(&self, resource_id: &str) -> ApiRoot {
        ApiRoot(format!("{}/ex/confluence/{}/api/v2", self.base, resource_id))
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_URL)
    }
}

/// Decodes a discovery response into its resources, in server order.
///
/// # Errors
///
/// Returns `Configuration("malformed discovery response ...")` when the body
/// is not a JSON array of resource objects.
pub fn parse_accessible_resources(body: &Value) -> Result<Vec<AccessibleResource>> {
    if !body.is_array() {
        return Err(ApiError::Configuration(
            "malformed discovery response: expected a JSON array".to_string(),
        ));
    }
    Vec::<AccessibleResource>::deserialize(body)
        .map_err(|e| ApiError::Configuration(format!("malformed discovery response: {}", e)))
}

/// Selects the first accessible resource and derives its API root.
///
/// # Errors
///
/// - `Configuration("no accessible resources")` for an empty array
/// - `Configuration("resource id missing")` when the first entry has no
///   `id` or an empty one
/// - `Configuration("malformed discovery response ...")` when the body is
///   not a JSON array of resource objects
pub fn api_root_from_discovery(body: &Value, gateway: &Gateway) -> Result<ApiRoot> {
    let resources = parse_accessible_resources(body)?;

    let first = resources
        .first()
        .ok_or_else(|| ApiError::Configuration("no accessible resources".to_string()))?;

    let id = first
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Configuration("resource id missing".to_string()))?;

    if resources.len() > 1 {
        tracing::debug!(
            "{} accessible resources, using the first ({} at {})",
            resources.len(),
            id,
            first.url.as_deref().unwrap_or("unknown site")
        );
    }

    Ok(gateway.api_root_for(id))
}

/// Runs discovery against `gateway` and returns the derived API root.
///
/// Performs exactly one request and caches nothing.
///
/// # Errors
///
/// - [`ApiError::Http`] if discovery answers with a non-2xx status
/// - [`ApiError::Configuration`] for an empty or malformed resource list
/// - Any credential or transport error, unmodified
pub async fn resolve_api_root(
    transport: &dyn Transport,
    credentials: &dyn CredentialProvider,
    gateway: &Gateway,
) -> Result<ApiRoot> {
    let request = HttpRequest {
        method: HttpMethod::Get,
        url: gateway.discovery_url()?,
        headers: credentials.headers()?,
        body: None,
    };

    tracing::debug!("Discovering accessible resources at {}", request.url);
    let response = transport.send(request).await?.error_for_status()?;

    let body: Value = serde_json::from_str(&response.body).map_err(|e| {
        ApiError::Configuration(format!("malformed discovery response: {}", e))
    })?;

    api_root_from_discovery(&body, gateway)
}

/// Caches the API root for the lifetime of a client.
///
/// Concurrent first calls may both run discovery; they compute the same
/// root from the same credentials, and the last write wins. Failures are not
/// cached, so the next call starts discovery afresh.
#[derive(Debug)]
pub struct ResourceResolver {
    gateway: Gateway,
    cached: RwLock<Option<ApiRoot>>,
}

impl ResourceResolver {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            cached: RwLock::new(None),
        }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// The cached root, if discovery succeeded or an override was set.
    pub fn cached(&self) -> Option<ApiRoot> {
        match self.cached.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns the cached root, running discovery first if there is none.
    pub async fn resolve(
        &self,
        transport: &dyn Transport,
        credentials: &dyn CredentialProvider,
    ) -> Result<ApiRoot> {
        if let Some(root) = self.cached() {
            tracing::debug!("Using cached API root");
            return Ok(root);
        }

        let root = resolve_api_root(transport, credentials, &self.gateway).await?;
        tracing::info!("Resolved API root {}", root);
        self.store(root.clone());
        Ok(root)
    }

    /// Sets the root unconditionally, suppressing future discovery.
    ///
    /// The value is not validated.
    pub fn override_root(&self, value: impl Into<ApiRoot>) {
        let root = value.into();
        tracing::info!("API root overridden to {}", root);
        self.store(root);
    }

    fn store(&self, root: ApiRoot) {
        match self.cached.write() {
            Ok(mut guard) => *guard = Some(root),
            Err(poisoned) => *poisoned.into_inner() = Some(root),
        }
    }
}

impl Default for ResourceResolver {
    fn default() -> Self {
        Self::new(Gateway::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_root_from_first_resource() {
        let body = json!([
            {"id": "abc123", "name": "first", "url": "https://first.atlassian.net"},
            {"id": "def456", "name": "second"}
        ]);
        let root = api_root_from_discovery(&body, &Gateway::default()).unwrap();
        assert_eq!(
            root.as_str(),
            "https://api.atlassian.com/ex/confluence/abc123/api/v2"
        );
    }

    #[test]
    fn test_empty_discovery_is_configuration_error() {
        let err = api_root_from_discovery(&json!([]), &Gateway::default()).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: no accessible resources");
    }

    #[test]
    fn test_missing_id_is_configuration_error() {
        let err =
            api_root_from_discovery(&json!([{"name": "no id"}]), &Gateway::default()).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: resource id missing");
    }

    #[test]
    fn test_non_string_id_is_configuration_error() {
        let err = api_root_from_discovery(&json!([{"id": 7}]), &Gateway::default()).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
        assert!(err.to_string().contains("malformed discovery response"));
    }

    #[test]
    fn test_empty_id_is_missing() {
        let err = api_root_from_discovery(&json!([{"id": ""}]), &Gateway::default()).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: resource id missing");
    }

    #[test]
    fn test_object_body_is_malformed() {
        let err = api_root_from_discovery(&json!({"id": "x"}), &Gateway::default()).unwrap_err();
        assert!(err.to_string().contains("malformed discovery response"));
    }

    #[test]
    fn test_gateway_trims_trailing_slash() {
        let gateway = Gateway::new("http://127.0.0.1:1234/");
        assert_eq!(
            gateway.discovery_url().unwrap().as_str(),
            "http://127.0.0.1:1234/oauth/token/accessible-resources"
        );
        assert_eq!(
            gateway.api_root_for("r1").as_str(),
            "http://127.0.0.1:1234/ex/confluence/r1/api/v2"
        );
    }

    #[test]
    fn test_override_marks_resolved() {
        let resolver = ResourceResolver::default();
        assert_eq!(resolver.cached(), None);
        resolver.override_root("http://localhost/root");
        assert_eq!(resolver.cached(), Some(ApiRoot::from("http://localhost/root")));
    }

    #[test]
    fn test_parse_accessible_resources_keeps_order_and_metadata() {
        let resources = parse_accessible_resources(&json!([
            {
                "id": "abc",
                "name": "site",
                "url": "https://site.atlassian.net",
                "scopes": ["read:confluence-content.all"],
                "avatarUrl": "https://example.com/a.png"
            },
            {"id": "def"}
        ]))
        .unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].id.as_deref(), Some("abc"));
        assert_eq!(resources[0].url.as_deref(), Some("https://site.atlassian.net"));
        assert_eq!(resources[0].scopes, ["read:confluence-content.all"]);
        assert_eq!(
            resources[0].avatar_url.as_deref(),
            Some("https://example.com/a.png")
        );
        assert_eq!(
            resources[1],
            AccessibleResource {
                id: Some("def".to_string()),
                ..Default::default()
            }
        );
    }
}
