//
//  confluence-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence Client Library
//!
//! A typed client for the Confluence Cloud REST API v2, plus the `cfl`
//! command-line tool built on it.
//!
//! ## Overview
//!
//! Callers hold an OAuth access token. The client discovers which Confluence
//! site that token can reach through the provider's gateway, caches the
//! resulting API root, and then turns named operations plus arguments into
//! HTTP requests.
//!
//! ## Module Structure
//!
//! - [`api`]: Operation registry, request assembly, discovery, transport
//! - [`auth`]: Credentials and the header seam
//! - [`config`]: Configuration file management
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use confluence_client::api::{Args, ConfluenceClient};
//! use confluence_client::auth::AuthCredential;
//!
//! # async fn example() -> confluence_client::api::Result<()> {
//! let client = ConfluenceClient::new(AuthCredential::bearer("your-token"))?;
//! let page = client
//!     .invoke("get_page_by_id", Args::new().set("id", "123").set("body_format", "storage"))
//!     .await?;
//! println!("{}", page["title"]);
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// Confluence Cloud REST API v2 client.
///
/// Handles tenant discovery, request assembly, cursor pagination and error
/// mapping. Typed wrappers for common resources live in [`api::confluence`].
pub mod api;

/// Credentials and authorization headers.
pub mod auth;

/// Configuration file management.
///
/// - Linux: `~/.config/cfl/config.toml`
/// - macOS: `~/Library/Application Support/cfl/config.toml`
/// - Windows: `%APPDATA%\cfl\config\config.toml`
pub mod config;

/// Output formatting for tables and JSON.
pub mod output;

pub use cli::Cli;
pub use config::Config;

/// Name of the CLI binary, also used for the configuration directory.
pub const APP_NAME: &str = "cfl";

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    use crate::api::ApiError;

    /// The command completed without errors.
    pub const SUCCESS: i32 = 0;

    /// Unspecified failure; details are on stderr.
    pub const ERROR: i32 = 1;

    /// The call was malformed and nothing was sent.
    pub const USAGE: i32 = 2;

    /// No usable tenant or token, or the server answered 401/403.
    pub const AUTH_ERROR: i32 = 4;

    /// The server answered 404.
    pub const NOT_FOUND: i32 = 8;

    /// The server answered 429.
    pub const RATE_LIMIT: i32 = 32;

    /// Maps a command failure to its exit code.
    ///
    /// Errors that do not wrap an [`ApiError`] map to [`ERROR`].
    pub fn for_error(err: &anyhow::Error) -> i32 {
        match err.downcast_ref::<ApiError>() {
            Some(api) => for_api_error(api),
            None => ERROR,
        }
    }

    pub fn for_api_error(err: &ApiError) -> i32 {
        match err {
            ApiError::Validation(_) => USAGE,
            ApiError::Configuration(_) => AUTH_ERROR,
            ApiError::Http { status, .. } => match status {
                401 | 403 => AUTH_ERROR,
                404 => NOT_FOUND,
                429 => RATE_LIMIT,
                _ => ERROR,
            },
            ApiError::Transport(_) | ApiError::Decode(_) => ERROR,
        }
    }

}
