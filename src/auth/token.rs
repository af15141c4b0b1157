//
//  confluence-client
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Sourcing
//!
//! Finds the access token the `cfl` binary authenticates with. Sources are
//! tried in order:
//!
//! 1. The `--token` flag. The value `-` reads one line from stdin.
//! 2. The environment variable named by `auth.token_env`
//!    (`CONFLUENCE_ACCESS_TOKEN` by default).
//!
//! Obtaining or refreshing tokens is left to the caller's OAuth tooling.
//!
//! ## Example
//!
//! ```rust,no_run
//! use confluence_client::auth::{resolve_token, AuthCredential};
//!
//! let token = resolve_token(None, "CONFLUENCE_ACCESS_TOKEN")?;
//! let credential = AuthCredential::bearer(token);
//! # Ok::<(), confluence_client::api::ApiError>(())
//! ```

use std::io::{self, BufRead};

use crate::api::common::{ApiError, Result};

/// Flag value asking for the token on stdin.
pub const STDIN_MARKER: &str = "-";

/// Reads a token from standard input.
///
/// Only the first line is read; surrounding whitespace is trimmed. Works with
/// piped input: `printf '%s' "$TOKEN" | cfl --token - resolve`.
pub fn read_token_from_stdin() -> Result<String> {
    let stdin = io::stdin();
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .map_err(|e| ApiError::Configuration(format!("failed to read token from stdin: {}", e)))?;

    Ok(line.trim().to_string())
}

/// Validates the format of a token string.
///
/// A token must be non-empty and free of whitespace. This is a format check
/// only; the server is the judge of validity.
///
/// # Example
///
/// ```rust
/// use confluence_client::auth::validate_token;
///
/// assert!(validate_token("eyJhbGciOiJSUzI1NiJ9.e30.sig"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// assert!(!validate_token("has\nnewline"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Picks the token from an explicit value or the environment.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when no source yields a token, or when
/// the token fails [`validate_token`].
pub fn resolve_token(explicit: Option<&str>, env_var: &str) -> Result<String> {
    let token = match explicit {
        Some(STDIN_MARKER) => read_token_from_stdin()?,
        Some(value) => value.trim().to_string(),
        None => match std::env::var(env_var) {
            Ok(value) => value.trim().to_string(),
            Err(_) => {
                return Err(ApiError::Configuration(format!(
                    "no access token: pass --token or set {}",
                    env_var
                )))
            }
        },
    };

    if !validate_token(&token) {
        return Err(ApiError::Configuration(
            "access token is empty or contains whitespace".to_string(),
        ));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_token_wins() {
        let token = resolve_token(Some("  abc  "), "CFL_TEST_UNSET_TOKEN_VAR").unwrap();
        assert_eq!(token, "abc");
    }

    #[test]
    fn test_missing_token_names_variable() {
        let err = resolve_token(None, "CFL_TEST_SURELY_UNSET_VAR_9431").unwrap_err();
        assert!(err.to_string().contains("CFL_TEST_SURELY_UNSET_VAR_9431"));
    }

    #[test]
    fn test_whitespace_token_rejected() {
        let err = resolve_token(Some("a b"), "UNUSED").unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn test_validate_token() {
        assert!(validate_token("abc123"));
        assert!(!validate_token("has\ttab"));
    }
}
