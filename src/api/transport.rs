//
//  confluence-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The only place the client performs I/O. Everything above it (resource
//! discovery, request assembly) deals in plain [`HttpRequest`] and
//! [`HttpResponse`] values, which keeps those layers testable with a stub
//! [`Transport`].
//!
//! ## Features
//!
//! - [`ReqwestTransport`]: production transport over `reqwest` with rustls
//! - JSON `Accept` and `Content-Type` headers
//! - Custom User-Agent header and request timeout
//! - Sanitized logging of error bodies
//!
//! Timeouts and cancellation belong to this layer; nothing here retries.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::common::{ApiError, Result};
use super::operations::HttpMethod;

/// Maximum length of a response body excerpt written to the log.
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A request as handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

/// A response as returned by the transport, status not yet inspected.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header; names are stored lowercase, as `reqwest` reports them.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`ApiError::Http`].
    ///
    /// The full body is kept in the error; only a sanitized excerpt is logged.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        tracing::warn!("API error: {} - {}", self.status, sanitize_for_log(&self.body));
        Err(ApiError::Http {
            status: self.status,
            body: self.body,
        })
    }
}

/// Executes HTTP exchanges for the client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the raw response, whatever its status.
    ///
    /// Errors are reserved for exchanges that could not complete.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout and user agent.
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, &format!("cfl/{}", crate::VERSION))
    }

    /// Creates a transport with an explicit timeout and user agent.
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .http
            .request(request.method.into(), request.url)
            .header(reqwest::header::ACCEPT, "application/json");

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        tracing::debug!("-> {} ({} bytes)", status, body.len());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Truncates long bodies and strips non-printable characters for logging.
pub fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}
