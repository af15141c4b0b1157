//
//  confluence-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Confluence Client
//!
//! This module provides the types shared by every layer of the client: the
//! error taxonomy, the `_links` envelope attached to list responses, and the
//! cursor pagination helpers (re-exported from the [`pagination`] submodule).
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all client operations
//! - [`Links`] - The `_links` envelope of list responses
//! - [`CursorPage`] - Typed page of results with its links
//! - Pagination helpers (re-exported from [`pagination`])
//!
//! # Example
//!
//! ```rust
//! use confluence_client::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Validation(reason)) => println!("Fix the call: {}", reason),
//!         Err(ApiError::Http { status, .. }) if status == 404 => println!("Not found"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - HTTP failures are not classified beyond their status code; callers
//!   inspect [`ApiError::status`] themselves
//! - Nothing in this crate retries; every error reaches the immediate caller

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Result type alias used throughout the API layer.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type for all Confluence client operations.
///
/// # Variants
///
/// | Variant | Raised when | Recoverable by |
/// |---------|-------------|----------------|
/// | `Configuration` | Discovery found no usable tenant resource | Fixing credentials or tenant setup |
/// | `Validation` | A required argument is missing or undeclared | Supplying the argument |
/// | `Http` | The server answered with a non-2xx status | Inspecting the status code |
/// | `Transport` | The exchange could not complete at all | Network conditions |
/// | `Decode` | A 2xx body was not valid JSON | Nothing; server contract broken |
///
/// `Configuration` and `Validation` are raised before or instead of the
/// operation's own request; `Validation` in particular is always raised
/// before any network traffic.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No accessible tenant resource, or the discovery response was malformed.
    ///
    /// # Parameters
    ///
    /// - `0` - What was wrong with the discovery outcome
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A call was rejected before reaching the network.
    ///
    /// Raised for missing required path parameters, unknown operation names
    /// and arguments the operation does not declare.
    ///
    /// # Parameters
    ///
    /// - `0` - Description of the problem with the call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The server returned a non-success status.
    ///
    /// The body is kept verbatim so the caller can inspect the server's own
    /// error document.
    #[error("HTTP {status}: {body}")]
    Http {
        /// The HTTP status code
        status: u16,
        /// The raw response body
        body: String,
    },

    /// The transport failed to complete the exchange.
    ///
    /// Covers connection failures, timeouts, DNS and TLS errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A successful response carried a body that is not valid JSON.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Builds the error raised for a missing required parameter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use confluence_client::api::common::ApiError;
    ///
    /// let err = ApiError::missing_parameter("page-id");
    /// assert_eq!(err.to_string(), "Validation error: missing required parameter 'page-id'");
    /// ```
    pub fn missing_parameter(name: &str) -> Self {
        Self::Validation(format!("missing required parameter '{}'", name))
    }

    /// Returns the HTTP status code for [`ApiError::Http`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for errors raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {}", err))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// The `_links` envelope attached to Confluence list and entity responses.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `next` | Relative URL of the next page; absent on the last page |
/// | `base` | Site base URL (e.g. `https://example.atlassian.net/wiki`) |
/// | `webui` | Relative web UI link for entities |
///
/// Any other link relations are kept in `other`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Links {
    /// Relative URL of the next page of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Base URL of the Confluence site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Relative link to the entity in the web UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webui: Option<String>,

    /// Remaining link relations, kept verbatim.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// One page of a cursor-paginated list response.
///
/// Confluence v2 list endpoints answer with
/// `{"results": [...], "_links": {"next": "/wiki/api/v2/...?cursor=..."}}`.
///
/// # Example
///
/// ```rust
/// use confluence_client::api::common::CursorPage;
/// use serde_json::Value;
///
/// let json = r#"{
///     "results": [{"id": "1"}],
///     "_links": {"next": "/wiki/api/v2/pages?cursor=abc"}
/// }"#;
///
/// let page: CursorPage<Value> = serde_json::from_str(json).unwrap();
/// assert_eq!(page.results.len(), 1);
/// assert_eq!(page.next_cursor().as_deref(), Some("abc"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPage<T> {
    /// Items in this page. May be empty.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Navigation links for this page.
    #[serde(default, rename = "_links")]
    pub links: Links,
}

impl<T> CursorPage<T> {
    /// Checks if the server advertised another page.
    pub fn has_next(&self) -> bool {
        self.links.next.is_some()
    }

    /// Returns the opaque cursor of the next page, if any.
    ///
    /// `None` while [`has_next`](Self::has_next) is true means the next link
    /// carries no cursor and the traversal cannot be resumed.
    pub fn next_cursor(&self) -> Option<String> {
        self.links.next.as_deref().and_then(cursor_from_link)
    }
}
