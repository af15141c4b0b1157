//
//  confluence-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cursor Pagination for Confluence List Responses
//!
//! Every list operation declares a `cursor` query argument. The server
//! answers with one page of `results` and, when more data exists, a relative
//! `_links.next` URL whose query string carries the cursor for the following
//! page. Without `_links.next`, the `rel="next"` entry of a `Link` response
//! header plays the same role. Cursors are opaque: they are extracted from
//! the link and passed back verbatim, never parsed or built by the client.
//!
//! # State Machine
//!
//! ```text
//! Start ──page with next──▶ Continuing(cursor) ──page with next──▶ Continuing(cursor')
//!   │                              │
//!   ├──page without next──▶ Exhausted ◀──page without next──┤
//!   │                              │
//!   └──next without cursor──▶ Unresumable(link) ◀──────────┘
//! ```
//!
//! [`ConfluenceClient::execute`](crate::api::ConfluenceClient::execute) never
//! follows `next` on its own. Callers drive the loop themselves with
//! [`CursorState`], or use [`collect_pages`] when they want every page.
//!
//! # Example
//!
//! ```rust
//! use confluence_client::api::common::{next_cursor, CursorState};
//! use serde_json::json;
//!
//! let first = json!({"results": [1], "_links": {"next": "/wiki/api/v2/pages?cursor=c2"}});
//! let last = json!({"results": [2], "_links": {}});
//!
//! let mut state = CursorState::Start;
//! state.advance(&first);
//! assert_eq!(state.cursor(), Some("c2"));
//! state.advance(&last);
//! assert!(state.is_exhausted());
//! assert_eq!(next_cursor(&last), None);
//! ```

use std::collections::BTreeMap;

use serde_json::Value;
use url::Url;

use super::{ApiError, Result};
use crate::api::request::Args;
use crate::api::ConfluenceClient;

/// Name of the query argument every list operation declares.
pub const CURSOR_ARG: &str = "cursor";

/// Base used to resolve relative `next` links; only the query string is read.
const LINK_BASE: &str = "https://localhost/";

/// Extracts the `cursor` query value from a `next` link.
///
/// Accepts relative (`/wiki/api/v2/pages?cursor=abc&limit=25`) and absolute
/// links. The value is returned percent-decoded, exactly as it must be sent
/// back in the `cursor` query parameter.
pub fn cursor_from_link(link: &str) -> Option<String> {
    let base = Url::parse(LINK_BASE).ok()?;
    let url = base.join(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == CURSOR_ARG)
        .map(|(_, value)| value.into_owned())
}

/// Returns the raw `_links.next` link of a list response, if present.
pub fn next_link(page: &Value) -> Option<&str> {
    page.get("_links")
        .and_then(|links| links.get("next"))
        .and_then(Value::as_str)
        .filter(|link| !link.is_empty())
}

/// Returns the cursor of the page after `page`, or `None` when exhausted.
pub fn next_cursor(page: &Value) -> Option<String> {
    next_link(page).and_then(cursor_from_link)
}

/// Extracts the `rel="next"` target from a `Link` header value.
///
/// ```rust
/// use confluence_client::api::common::next_link_from_header;
///
/// let header = r#"</wiki/api/v2/pages?cursor=c2>; rel="next", </wiki>; rel="base""#;
/// assert_eq!(next_link_from_header(header), Some("/wiki/api/v2/pages?cursor=c2"));
/// ```
pub fn next_link_from_header(value: &str) -> Option<&str> {
    value.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts
            .next()?
            .trim()
            .strip_prefix('<')?
            .strip_suffix('>')?;
        let is_next = parts.any(|param| {
            let param = param.trim();
            param
                .strip_prefix("rel=")
                .map(|rel| {
                    rel.trim_matches('"')
                        .split_whitespace()
                        .any(|r| r.eq_ignore_ascii_case("next"))
                })
                .unwrap_or(false)
        });
        (is_next && !target.is_empty()).then_some(target)
    })
}

/// The next-page link of a response: `_links.next` in the body, else the
/// `rel="next"` entry of the `Link` header.
pub fn next_page_link<'a>(
    page: &'a Value,
    headers: &'a BTreeMap<String, String>,
) -> Option<&'a str> {
    next_link(page).or_else(|| {
        headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("link"))
            .and_then(|(_, value)| next_link_from_header(value))
    })
}

/// Where a caller stands in a cursor-paginated traversal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CursorState {
    /// No page fetched yet; the first call carries no cursor.
    #[default]
    Start,
    /// More data exists; re-invoke the operation with this cursor.
    Continuing(String),
    /// The server advertised a next page (the link is kept) but the link
    /// carries no `cursor` to send back. Terminal, with data remaining.
    Unresumable(String),
    /// The last page carried no next link. Terminal.
    Exhausted,
}

impl CursorState {
    /// Moves the state forward after receiving `page`.
    ///
    /// Terminal states do not move.
    pub fn advance(&mut self, page: &Value) {
        self.advance_with_headers(page, &BTreeMap::new());
    }

    /// Like [`advance`](Self::advance), also consulting the `Link` header.
    pub fn advance_with_headers(&mut self, page: &Value, headers: &BTreeMap<String, String>) {
        if self.is_terminal() {
            return;
        }
        *self = match next_page_link(page, headers) {
            None => Self::Exhausted,
            Some(link) => match cursor_from_link(link) {
                Some(cursor) => Self::Continuing(cursor),
                None => {
                    tracing::warn!("Next page link has no cursor: {}", link);
                    Self::Unresumable(link.to_string())
                }
            },
        };
    }

    /// The cursor to send with the next call, if any.
    pub fn cursor(&self) -> Option<&str> {
        match self {
            Self::Continuing(cursor) => Some(cursor),
            _ => None,
        }
    }

    /// Whether every page was read.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    /// Whether traversal cannot continue, with or without data remaining.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Unresumable(_))
    }
}

/// Outcome of [`collect_pages`].
#[derive(Debug, Clone, Default)]
pub struct CollectedPages {
    /// Concatenated `results` of every fetched page.
    pub results: Vec<Value>,
    /// Number of pages fetched.
    pub pages: usize,
    /// `true` when iteration stopped with data remaining.
    pub truncated: bool,
    /// The next link that could not be followed, when it carried no cursor.
    pub unresumable_link: Option<String>,
}

/// Fetches every page of a list operation, concatenating `results`.
///
/// The next page comes from `_links.next`, or from the `Link` header when
/// the body has none. Iteration stops at the first page without a next
/// link, after `max_pages` pages, or if the server hands back a cursor it
/// already gave (which would otherwise loop forever). A next link without a
/// cursor also stops it, with `truncated` set and the link kept in
/// `unresumable_link`. A `cursor` supplied in `args` is the starting point.
///
/// # Errors
///
/// - [`ApiError::Validation`] if the operation does not declare a `cursor`
///   argument, or if `max_pages` is zero
/// - Any error of the underlying calls, unmodified
pub async fn collect_pages(
    client: &ConfluenceClient,
    operation: &str,
    args: Args,
    max_pages: usize,
) -> Result<CollectedPages> {
    let op = client.registry().require(operation)?;
    if !op.is_paginated() {
        return Err(ApiError::Validation(format!(
            "operation '{}' is not cursor-paginated",
            operation
        )));
    }
    if max_pages == 0 {
        return Err(ApiError::Validation("max_pages must be at least 1".to_string()));
    }

    let mut collected = CollectedPages::default();
    let mut state = match args.get(CURSOR_ARG).and_then(Value::as_str) {
        Some(cursor) => CursorState::Continuing(cursor.to_string()),
        None => CursorState::Start,
    };
    let mut seen: Vec<String> = Vec::new();

    loop {
        let mut call_args = args.clone();
        if let Some(cursor) = state.cursor() {
            seen.push(cursor.to_string());
            call_args = call_args.set(CURSOR_ARG, cursor);
        }

        let response = client.execute_response(op, call_args).await?;
        collected.pages += 1;

        if let Some(results) = response.value.get("results").and_then(Value::as_array) {
            collected.results.extend(results.iter().cloned());
        }

        state.advance_with_headers(&response.value, &response.headers);
        match &state {
            CursorState::Unresumable(link) => {
                collected.truncated = true;
                collected.unresumable_link = Some(link.clone());
                break;
            }
            CursorState::Continuing(cursor) if seen.iter().any(|c| c == cursor) => {
                tracing::warn!("Server repeated cursor for {}, stopping", operation);
                break;
            }
            CursorState::Continuing(_) if collected.pages >= max_pages => {
                collected.truncated = true;
                break;
            }
            CursorState::Continuing(_) => {}
            CursorState::Start | CursorState::Exhausted => break,
        }
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cursor_from_relative_link() {
        let link = "/wiki/api/v2/pages?limit=25&cursor=eyJpZCI6IjEyMyJ9";
        assert_eq!(cursor_from_link(link).as_deref(), Some("eyJpZCI6IjEyMyJ9"));
    }

    #[test]
    fn test_cursor_is_percent_decoded() {
        let link = "/wiki/api/v2/spaces?cursor=a%2Bb%3D%3D";
        assert_eq!(cursor_from_link(link).as_deref(), Some("a+b=="));
    }

    #[test]
    fn test_cursor_from_absolute_link() {
        let link = "https://example.atlassian.net/wiki/api/v2/pages?cursor=xyz";
        assert_eq!(cursor_from_link(link).as_deref(), Some("xyz"));
    }

    #[test]
    fn test_link_without_cursor() {
        assert_eq!(cursor_from_link("/wiki/api/v2/pages?limit=5"), None);
    }

    #[test]
    fn test_next_cursor_missing_links() {
        assert_eq!(next_cursor(&json!({"results": []})), None);
        assert_eq!(next_cursor(&json!({"_links": {"next": ""}})), None);
    }

    #[test]
    fn test_state_is_terminal_once_exhausted() {
        let mut state = CursorState::Start;
        state.advance(&json!({"_links": {}}));
        assert!(state.is_exhausted());

        state.advance(&json!({"_links": {"next": "/x?cursor=again"}}));
        assert!(state.is_exhausted());
        assert_eq!(state.cursor(), None);
    }

    #[test]
    fn test_link_header_next() {
        let header = r#"<https://acme.atlassian.net/wiki/api/v2/spaces?cursor=c2>; rel="next""#;
        assert_eq!(
            next_link_from_header(header),
            Some("https://acme.atlassian.net/wiki/api/v2/spaces?cursor=c2")
        );
        assert_eq!(next_link_from_header(r#"</wiki>; rel="base""#), None);
        assert_eq!(next_link_from_header("not a link"), None);
    }

    #[test]
    fn test_body_link_wins_over_header() {
        let mut headers = BTreeMap::new();
        headers.insert("link".to_string(), r#"</h?cursor=header>; rel="next""#.to_string());

        let with_body = json!({"_links": {"next": "/b?cursor=body"}});
        assert_eq!(next_page_link(&with_body, &headers), Some("/b?cursor=body"));

        let without_body = json!({"results": []});
        assert_eq!(next_page_link(&without_body, &headers), Some("/h?cursor=header"));
    }

    #[test]
    fn test_state_follows_link_header() {
        let mut headers = BTreeMap::new();
        headers.insert("Link".to_string(), r#"</wiki/api/v2/spaces?cursor=c2>; rel="next""#.to_string());

        let mut state = CursorState::Start;
        state.advance_with_headers(&json!({"results": [1]}), &headers);
        assert_eq!(state.cursor(), Some("c2"));
    }

    #[test]
    fn test_next_link_without_cursor_is_unresumable() {
        let page = json!({"results": [1], "_links": {"next": "/wiki/api/v2/spaces?limit=2&start=2"}});
        let mut state = CursorState::Start;
        state.advance(&page);

        assert_eq!(
            state,
            CursorState::Unresumable("/wiki/api/v2/spaces?limit=2&start=2".to_string())
        );
        assert!(!state.is_exhausted());
        assert!(state.is_terminal());
        assert_eq!(state.cursor(), None);

        state.advance(&json!({"_links": {"next": "/x?cursor=later"}}));
        assert!(matches!(state, CursorState::Unresumable(_)));
    }
}
