//
//  confluence-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! A client for the Confluence Cloud REST API v2, reached through the
//! provider's OAuth gateway.
//!
//! ## Architecture
//!
//! - [`operations`]: Declarative registry of every supported operation
//! - [`request`]: Request assembly from an operation plus arguments
//! - [`resolver`]: Discovery and caching of the tenant API root
//! - [`transport`]: The single I/O seam and its `reqwest` implementation
//! - [`client`]: [`ConfluenceClient`], wiring the above together
//! - [`confluence`]: Typed wrappers for common resources
//! - [`common`]: Error taxonomy, `_links` envelope, pagination helpers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use confluence_client::api::{collect_pages, Args, ConfluenceClient};
//! use confluence_client::auth::AuthCredential;
//!
//! # async fn example() -> confluence_client::api::Result<()> {
//! let client = ConfluenceClient::new(AuthCredential::bearer("your-token"))?;
//!
//! // One page of spaces
//! let spaces = client.invoke("get_spaces", Args::new().set("limit", 25)).await?;
//!
//! // Every page of spaces
//! let all = collect_pages(&client, "get_spaces", Args::new(), 100).await?;
//! println!("{} spaces", all.results.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All calls return [`ApiError`]:
//!
//! - `Configuration`: discovery found no usable tenant
//! - `Validation`: the call was malformed; nothing was sent
//! - `Http`: the server answered non-2xx; status and body are kept
//! - `Transport` / `Decode`: the exchange failed or the body was not JSON

pub mod client;
pub mod common;
pub mod confluence;
pub mod operations;
pub mod request;
pub mod resolver;
pub mod transport;

pub use client::{ApiResponse, ConfluenceClient};
pub use common::{collect_pages, ApiError, CursorPage, CursorState, Result};
pub use operations::{registry, HttpMethod, Operation, Registry};
pub use request::{assemble, Args, PreparedRequest, RequestSpec};
pub use resolver::{
    parse_accessible_resources, AccessibleResource, ApiRoot, Gateway, ResourceResolver,
};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
