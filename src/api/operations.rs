//
//  confluence-client
//  api/operations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Operation Registry
//!
//! Every Confluence REST operation the client can call is declared as data:
//! an HTTP method, a path template with `{param}` placeholders, the optional
//! query arguments with their wire names, and (for mutating calls) the
//! optional body fields. The declarations live in `src/resources/*.json`,
//! are compiled into the binary, and are parsed once on first access.
//!
//! The [request assembler](crate::api::request) is the single interpreter
//! of these descriptors; no operation builds URLs by hand.
//!
//! ## Example
//!
//! ```rust
//! use confluence_client::api::operations::registry;
//!
//! let op = registry().get("get_page_by_id").unwrap();
//! assert_eq!(op.path, "/pages/{id}");
//! assert_eq!(op.wire_name("include_labels"), Some("include-labels"));
//! ```

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::common::{ApiError, Result, CURSOR_ARG};

/// Embedded operation catalogs (compiled into the binary).
const CATALOGS: &[(&str, &str)] = &[
    ("content", include_str!("../resources/content.json")),
    ("comments", include_str!("../resources/comments.json")),
    ("spaces", include_str!("../resources/spaces.json")),
    ("platform", include_str!("../resources/platform.json")),
];

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    // {page_id}, {id}, {property_id}
    Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern is valid")
});

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

static REGISTRY: Lazy<Registry> = Lazy::new(|| match Registry::load_embedded() {
    Ok(registry) => registry,
    Err(e) => panic!("embedded operation catalog is invalid: {}", e),
});

/// Returns the process-wide operation registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// HTTP verbs used by the Confluence v2 API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this method may carry a JSON body.
    pub fn allows_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// What a successful response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// A JSON object or array.
    #[default]
    Json,
    /// No meaningful body (typically `204 No Content`).
    Empty,
}

/// Maps an argument name to the name sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Name the caller uses (e.g. `body_format`).
    pub arg: String,
    /// Name the server expects (e.g. `body-format`).
    pub wire: String,
}

/// A path parameter derived from a `{placeholder}` in the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParam {
    /// Argument name, identical to the placeholder.
    pub arg: String,
    /// Hyphenated name used in validation messages (`page_id` → `page-id`).
    pub wire: String,
}

/// Declarative description of one REST operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    pub method: HttpMethod,
    /// Path relative to the API root, with `{param}` placeholders.
    pub path: String,
    /// Resource family, as documented by the API (e.g. `Content Properties`).
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub query: Vec<ParamSpec>,
    #[serde(default)]
    pub body: Vec<ParamSpec>,
    #[serde(default)]
    pub response: ResponseKind,
    #[serde(skip_deserializing)]
    pub path_params: Vec<PathParam>,
}

impl Operation {
    /// Whether the operation sends a JSON body.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Whether the operation is a cursor-paginated list call.
    pub fn is_paginated(&self) -> bool {
        self.query.iter().any(|p| p.arg == CURSOR_ARG)
    }

    /// Looks up the wire name of a query or body argument.
    pub fn wire_name(&self, arg: &str) -> Option<&str> {
        self.query
            .iter()
            .chain(self.body.iter())
            .find(|p| p.arg == arg)
            .map(|p| p.wire.as_str())
    }

    /// Whether `arg` is any argument this operation declares.
    pub fn declares(&self, arg: &str) -> bool {
        self.path_params.iter().any(|p| p.arg == arg) || self.wire_name(arg).is_some()
    }

    /// All argument names, path parameters first.
    pub fn arguments(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.path_params.iter().map(|p| p.arg.as_str()).collect();
        for spec in self.query.iter().chain(self.body.iter()) {
            if !names.contains(&spec.arg.as_str()) {
                names.push(spec.arg.as_str());
            }
        }
        names
    }

    fn derive_path_params(&mut self) -> std::result::Result<(), String> {
        let mut params = Vec::new();
        for caps in PLACEHOLDER.captures_iter(&self.path) {
            let name = &caps[1];
            if !IDENTIFIER.is_match(name) {
                return Err(format!("{}: invalid placeholder '{{{}}}'", self.name, name));
            }
            params.push(PathParam {
                arg: name.to_string(),
                wire: name.replace('_', "-"),
            });
        }
        self.path_params = params;
        Ok(())
    }
}

#[derive(Deserialize)]
struct Catalog {
    operations: Vec<Operation>,
}

/// Lookup table of all declared operations, in declaration order.
#[derive(Debug, Clone)]
pub struct Registry {
    operations: Vec<Operation>,
}

impl Registry {
    /// Parses and validates the embedded catalogs.
    fn load_embedded() -> std::result::Result<Self, String> {
        Self::from_catalogs(CATALOGS)
    }

    /// Builds a registry from `(label, json)` catalogs.
    ///
    /// Validation rejects duplicate names, malformed placeholders and body
    /// fields on methods that cannot carry a body.
    pub fn from_catalogs(catalogs: &[(&str, &str)]) -> std::result::Result<Self, String> {
        let mut operations = Vec::new();
        let mut names = HashSet::new();

        for (label, content) in catalogs {
            let catalog: Catalog = serde_json::from_str(content)
                .map_err(|e| format!("catalog '{}': {}", label, e))?;

            for mut op in catalog.operations {
                if !names.insert(op.name.clone()) {
                    return Err(format!("duplicate operation '{}'", op.name));
                }
                if op.has_body() && !op.method.allows_body() {
                    return Err(format!("{}: {} cannot carry a body", op.name, op.method));
                }
                op.derive_path_params()?;
                operations.push(op);
            }
        }

        Ok(Self { operations })
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }

    /// Like [`get`](Self::get) but fails with [`ApiError::Validation`].
    pub fn require(&self, name: &str) -> Result<&Operation> {
        self.get(name)
            .ok_or_else(|| ApiError::Validation(format!("unknown operation '{}'", name)))
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Distinct tags in first-seen order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for op in &self.operations {
            if !tags.contains(&op.tag.as_str()) {
                tags.push(op.tag.as_str());
            }
        }
        tags
    }

    /// Operations whose tag list contains `tag` (case-insensitive).
    ///
    /// Tags such as `"Page, important"` match both `page` and `important`.
    pub fn by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Operation> + 'a {
        self.operations.iter().filter(move |op| {
            op.tag
                .split(',')
                .any(|t| t.trim().eq_ignore_ascii_case(tag.trim()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads_successfully() {
        let registry = registry();
        assert_eq!(registry.len(), 187);
        assert!(registry.get("get_pages").is_some());
    }

    #[test]
    fn test_path_params_derived_from_template() {
        let op = registry()
            .get("get_page_content_properties_by_id")
            .unwrap();
        let args: Vec<&str> = op.path_params.iter().map(|p| p.arg.as_str()).collect();
        let wires: Vec<&str> = op.path_params.iter().map(|p| p.wire.as_str()).collect();
        assert_eq!(args, vec!["page_id", "property_id"]);
        assert_eq!(wires, vec!["page-id", "property-id"]);
    }

    #[test]
    fn test_wire_name_mapping_is_stable() {
        for op in registry().operations() {
            for spec in op.query.iter() {
                match spec.arg.as_str() {
                    "body_format" => assert_eq!(spec.wire, "body-format", "{}", op.name),
                    "include_labels" => assert_eq!(spec.wire, "include-labels", "{}", op.name),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_every_placeholder_is_a_path_param() {
        for op in registry().operations() {
            let braces = op.path.matches('{').count();
            assert_eq!(braces, op.path_params.len(), "{}", op.name);
        }
    }

    #[test]
    fn test_only_post_and_put_declare_bodies() {
        for op in registry().operations() {
            if op.has_body() {
                assert!(op.method.allows_body(), "{}", op.name);
            }
        }
    }

    #[test]
    fn test_deletes_declare_empty_response() {
        let op = registry().get("delete_page").unwrap();
        assert_eq!(op.method, HttpMethod::Delete);
        assert_eq!(op.response, ResponseKind::Empty);
    }

    #[test]
    fn test_footer_comment_links_mapping() {
        let op = registry().get("update_footer_comment").unwrap();
        assert_eq!(op.wire_name("alinks"), Some("links"));
    }

    #[test]
    fn test_list_operations_are_paginated() {
        assert!(registry().get("get_spaces").unwrap().is_paginated());
        assert!(!registry().get("get_space_by_id").unwrap().is_paginated());
    }

    #[test]
    fn test_by_tag_splits_compound_tags() {
        let names: Vec<&str> = registry().by_tag("important").map(|op| op.name.as_str()).collect();
        assert_eq!(names, vec!["get_pages"]);
        assert!(registry().by_tag("page").any(|op| op.name == "get_pages"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let catalog = r#"{"operations": [
            {"name": "a", "method": "GET", "path": "/a"},
            {"name": "a", "method": "GET", "path": "/b"}
        ]}"#;
        let err = Registry::from_catalogs(&[("test", catalog)]).unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_rejects_body_on_get() {
        let catalog = r#"{"operations": [
            {"name": "a", "method": "GET", "path": "/a", "body": [{"arg": "x", "wire": "x"}]}
        ]}"#;
        assert!(Registry::from_catalogs(&[("test", catalog)]).is_err());
    }

    #[test]
    fn test_rejects_malformed_placeholder() {
        let catalog = r#"{"operations": [
            {"name": "a", "method": "GET", "path": "/a/{not valid}"}
        ]}"#;
        assert!(Registry::from_catalogs(&[("test", catalog)]).is_err());
    }

    #[test]
    fn test_require_unknown_operation() {
        let err = registry().require("no_such_thing").unwrap_err();
        assert!(err.is_validation());
    }
}
