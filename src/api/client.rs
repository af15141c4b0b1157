//
//  confluence-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence Client
//!
//! [`ConfluenceClient`] ties the pieces together for each call:
//!
//! 1. Look the operation up in the registry
//! 2. Sort the arguments into path, query and body parts (validation happens
//!    here, before any network traffic)
//! 3. Resolve the API root, running discovery on first use
//! 4. Attach fresh credential headers and send through the transport
//! 5. Map non-2xx to [`ApiError::Http`] and decode the JSON body
//!
//! Calls return one response. List operations hand back a single page whose
//! `_links.next` the caller follows with
//! [`collect_pages`](super::common::collect_pages) or [`CursorState`](super::common::CursorState).
//!
//! ## Example
//!
//! ```rust,no_run
//! use confluence_client::api::{Args, ConfluenceClient};
//! use confluence_client::auth::AuthCredential;
//!
//! # async fn example() -> confluence_client::api::Result<()> {
//! let client = ConfluenceClient::new(AuthCredential::bearer("token"))?;
//! let page = client
//!     .invoke("get_page_by_id", Args::new().set("id", "123").set("body_format", "storage"))
//!     .await?;
//! println!("{}", page["title"]);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::common::{ApiError, Result};
use super::operations::{registry, Operation, Registry, ResponseKind};
use super::request::{Args, RequestSpec};
use super::resolver::{ApiRoot, Gateway, ResourceResolver};
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::auth::CredentialProvider;
use crate::config::ApiConfig;

/// A decoded 2xx response together with its headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub value: Value,
    /// Header names are lowercase.
    pub headers: BTreeMap<String, String>,
}

/// Typed client over the Confluence Cloud REST API v2.
///
/// Holds the credential provider, the transport and the lazily resolved API
/// root. All methods take `&self`; share the client behind an `Arc` to use it
/// from several tasks.
pub struct ConfluenceClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialProvider>,
    resolver: ResourceResolver,
    registry: &'static Registry,
}

impl ConfluenceClient {
    /// Creates a client over `reqwest` with default settings.
    ///
    /// The API root is discovered through `https://api.atlassian.com` on the
    /// first call.
    pub fn new(credentials: impl CredentialProvider + 'static) -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?, credentials))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(
        transport: impl Transport + 'static,
        credentials: impl CredentialProvider + 'static,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            credentials: Arc::new(credentials),
            resolver: ResourceResolver::default(),
            registry: registry(),
        }
    }

    /// Creates a client from the `[api]` configuration section.
    ///
    /// A configured `api_root` is installed as an override, so discovery is
    /// skipped.
    pub fn from_config(
        config: &ApiConfig,
        credentials: impl CredentialProvider + 'static,
    ) -> Result<Self> {
        let transport = ReqwestTransport::with_options(config.timeout(), &config.user_agent())?;
        let client =
            Self::with_transport(transport, credentials).with_gateway(config.gateway_url.as_str());
        if let Some(root) = &config.api_root {
            client.set_api_root(root.as_str());
        }
        Ok(client)
    }

    /// Points discovery at a different gateway. Drops any resolved root.
    pub fn with_gateway(mut self, gateway: impl Into<String>) -> Self {
        self.resolver = ResourceResolver::new(Gateway::new(gateway));
        self
    }

    /// Fixes the API root up front; discovery will not run.
    pub fn with_api_root(self, root: impl Into<ApiRoot>) -> Self {
        self.set_api_root(root);
        self
    }

    /// Overrides the API root. Subsequent calls use it without discovery.
    ///
    /// The value is not validated.
    pub fn set_api_root(&self, root: impl Into<ApiRoot>) {
        self.resolver.override_root(root);
    }

    /// Returns the API root, running discovery if it is not yet known.
    pub async fn api_root(&self) -> Result<ApiRoot> {
        self.resolver
            .resolve(self.transport.as_ref(), self.credentials.as_ref())
            .await
    }

    /// The API root if already resolved or overridden, without any I/O.
    pub fn cached_api_root(&self) -> Option<ApiRoot> {
        self.resolver.cached()
    }

    pub fn gateway(&self) -> &Gateway {
        self.resolver.gateway()
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Executes `op` with `args` and returns the decoded response.
    ///
    /// Operations whose response carries no body return `Value::Null`, as
    /// does any 2xx with an empty body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] for missing path parameters or undeclared
    ///   arguments. Nothing is sent, discovery included.
    /// - [`ApiError::Configuration`] if discovery finds no usable resource
    /// - [`ApiError::Http`] for a non-2xx status, from discovery or the call
    /// - [`ApiError::Transport`] / [`ApiError::Decode`] as raised below
    pub async fn execute(&self, op: &Operation, args: Args) -> Result<Value> {
        self.execute_response(op, args).await.map(|response| response.value)
    }

    /// Like [`execute`](Self::execute), but keeps the response headers.
    ///
    /// Pagination reads the `Link` header from here when the body carries
    /// no `_links.next`.
    pub async fn execute_response(&self, op: &Operation, args: Args) -> Result<ApiResponse> {
        let spec = RequestSpec::build(op, &args)?;
        let root = self.api_root().await?;
        let prepared = spec.prepare(&root)?;

        let request = HttpRequest {
            method: prepared.method,
            url: prepared.url,
            headers: self.credentials.headers()?,
            body: prepared.body,
        };

        let response = self.transport.send(request).await?.error_for_status()?;

        let value = if op.response == ResponseKind::Empty || response.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response.body)?
        };
        Ok(ApiResponse {
            value,
            headers: response.headers,
        })
    }

    /// Looks an operation up by name and executes it.
    pub async fn invoke(&self, operation: &str, args: Args) -> Result<Value> {
        let op = self.registry.require(operation)?;
        tracing::debug!("Invoking {}", op.name);
        self.execute(op, args).await
    }

    /// Invokes an operation and deserializes its response into `T`.
    pub async fn invoke_as<T: DeserializeOwned>(&self, operation: &str, args: Args) -> Result<T> {
        let value = self.invoke(operation, args).await?;
        serde_json::from_value(value)
            .map_err(|e| ApiError::Decode(format!("{} response: {}", operation, e)))
    }

    /// Invokes an operation whose result is not needed (typically a delete).
    pub async fn invoke_unit(&self, operation: &str, args: Args) -> Result<()> {
        self.invoke(operation, args).await.map(|_| ())
    }
}

impl std::fmt::Debug for ConfluenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfluenceClient")
            .field("gateway", self.resolver.gateway())
            .field("api_root", &self.resolver.cached())
            .finish_non_exhaustive()
    }
}
