//
//  confluence-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Supplies the headers that authenticate every request the client makes,
//! discovery included. The client never inspects or refreshes credentials;
//! it asks a [`CredentialProvider`] for headers right before each request,
//! so a provider backed by a rotating token is picked up without rebuilding
//! the client.
//!
//! ## Supported Authentication Methods
//!
//! - **OAuth 2.0 (3LO)**: Bearer access token. Required for the gateway's
//!   accessible-resources discovery.
//! - **API token**: Atlassian account email plus API token over HTTP Basic.
//!   Usable with an explicit API root override.
//! - **Static headers**: Arbitrary fixed headers, for proxies and tests.
//!
//! ## Module Structure
//!
//! - [`token`]: Token sourcing (flag, environment, stdin) and format checks
//!
//! ## Example
//!
//! ```rust
//! use confluence_client::auth::{AuthCredential, CredentialProvider};
//!
//! let credential = AuthCredential::bearer("your_access_token");
//! let headers = credential.headers().unwrap();
//! assert_eq!(headers["Authorization"], "Bearer your_access_token");
//! ```

mod token;

pub use token::*;

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::api::common::{ApiError, Result};

/// Name of the header carrying credentials.
pub const AUTHORIZATION: &str = "Authorization";

/// Supplies authentication headers for outgoing requests.
///
/// Implementations must be cheap to call; the client calls
/// [`headers`](Self::headers) once per request and never caches the result.
pub trait CredentialProvider: Send + Sync {
    /// Returns the headers to attach to the next request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] when no usable credential is
    /// available. The request is then not sent.
    fn headers(&self) -> Result<BTreeMap<String, String>>;
}

/// Credentials accepted by Confluence Cloud.
///
/// # Example
///
/// ```rust
/// use confluence_client::auth::AuthCredential;
/// use chrono::{Utc, Duration};
///
/// let oauth = AuthCredential::OAuth {
///     access_token: "eyJhbGciOiJIUzI1NiIs...".to_string(),
///     refresh_token: Some("refresh_token_here".to_string()),
///     expires_at: Some(Utc::now() + Duration::hours(1)),
/// };
/// assert!(!oauth.is_expired());
///
/// let basic = AuthCredential::Basic {
///     email: "me@example.com".to_string(),
///     api_token: "ATATT3x...".to_string(),
/// };
/// assert!(!basic.can_refresh());
/// ```
#[derive(Debug, Clone)]
pub enum AuthCredential {
    /// OAuth 2.0 access token, sent as `Bearer`.
    OAuth {
        /// The access token used for API authentication.
        access_token: String,
        /// Refresh token, if the grant issued one. Never used by the client.
        refresh_token: Option<String>,
        /// Expiry of the access token, if known.
        expires_at: Option<chrono::DateTime<chrono::Utc>>,
    },
    /// Atlassian account email and API token, sent as HTTP Basic.
    Basic {
        email: String,
        api_token: String,
    },
}

impl AuthCredential {
    /// A bearer credential with no refresh token or expiry.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::OAuth {
            access_token: token.into(),
            refresh_token: None,
            expires_at: None,
        }
    }

    /// The value of the `Authorization` header for this credential.
    pub fn authorization(&self) -> String {
        match self {
            Self::OAuth { access_token, .. } => format!("Bearer {}", access_token),
            Self::Basic { email, api_token } => {
                let encoded = STANDARD.encode(format!("{}:{}", email, api_token));
                format!("Basic {}", encoded)
            }
        }
    }

    /// Checks whether an OAuth token is past its known expiry.
    ///
    /// Credentials without an expiry never report expired. Informational only;
    /// the client sends the token regardless and lets the server decide.
    pub fn is_expired(&self) -> bool {
        match self {
            Self::OAuth {
                expires_at: Some(exp),
                ..
            } => *exp < chrono::Utc::now(),
            _ => false,
        }
    }

    /// Checks whether this credential carries a refresh token.
    pub fn can_refresh(&self) -> bool {
        matches!(
            self,
            Self::OAuth {
                refresh_token: Some(_),
                ..
            }
        )
    }

    fn secret(&self) -> &str {
        match self {
            Self::OAuth { access_token, .. } => access_token,
            Self::Basic { api_token, .. } => api_token,
        }
    }
}

impl CredentialProvider for AuthCredential {
    fn headers(&self) -> Result<BTreeMap<String, String>> {
        if self.secret().is_empty() {
            return Err(ApiError::Configuration("access token is empty".to_string()));
        }
        if self.is_expired() {
            tracing::debug!("Sending an access token past its recorded expiry");
        }

        let mut headers = BTreeMap::new();
        headers.insert(AUTHORIZATION.to_string(), self.authorization());
        Ok(headers)
    }
}

/// A fixed set of headers attached to every request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticHeaders(pub BTreeMap<String, String>);

impl StaticHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }
}

impl CredentialProvider for StaticHeaders {
    fn headers(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.0.clone())
    }
}
