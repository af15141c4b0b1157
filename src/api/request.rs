//
//  confluence-client
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Assembly
//!
//! Turns an [`Operation`] descriptor plus caller arguments into the exact
//! HTTP request the server expects. Arguments are nullable by default and an
//! absent argument never reaches the wire.
//!
//! ## Rules
//!
//! | Argument kind | Absent | Present |
//! |---------------|--------|---------|
//! | Path parameter | `Validation` error, no request | Percent-encoded into the path |
//! | Query argument | Omitted | Added under its wire name |
//! | Body field | Omitted from the object | Added under its wire name |
//!
//! Operations that declare body fields always send a JSON object, `{}` when
//! every field is absent. Query values are encoded as strings, booleans as
//! `true`/`false`, numbers in JSON form, arrays as one repeated pair per
//! element and objects as compact JSON.
//!
//! ## Example
//!
//! ```rust
//! use confluence_client::api::operations::registry;
//! use confluence_client::api::request::{Args, RequestSpec};
//! use confluence_client::api::ApiRoot;
//!
//! let op = registry().get("get_page_by_id").unwrap();
//! let args = Args::new()
//!     .set("id", "123")
//!     .set("body_format", "storage")
//!     .set("include_labels", true)
//!     .set("version", serde_json::Value::Null);
//!
//! let spec = RequestSpec::build(op, &args).unwrap();
//! let root = ApiRoot::from("https://api.atlassian.com/ex/confluence/abc/api/v2");
//! let request = spec.prepare(&root).unwrap();
//!
//! assert_eq!(
//!     request.url.as_str(),
//!     "https://api.atlassian.com/ex/confluence/abc/api/v2/pages/123?body-format=storage&include-labels=true"
//! );
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use super::common::{ApiError, Result};
use super::operations::{HttpMethod, Operation};
use super::resolver::ApiRoot;

/// Caller-supplied arguments for one operation call.
///
/// An ordered list of `name → value` pairs. `Value::Null` means absent, so
/// `Option` fields serialize naturally into "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Vec<(String, Value)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an argument, replacing any earlier value under the same name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets `name` only when `value` is `Some`.
    pub fn set_opt<V: Into<Value>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    /// Returns the value for `name` if it is present and not null.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .filter(|v| !v.is_null())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.values.iter().position(|(n, _)| n == name)?;
        Some(self.values.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds arguments from any struct that serializes to a JSON object.
    ///
    /// Field names become argument names; `None` fields become absent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if `params` does not serialize to an
    /// object.
    pub fn from_params<T: Serialize>(params: &T) -> Result<Self> {
        match serde_json::to_value(params)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Null => Ok(Self::new()),
            other => Err(ApiError::Validation(format!(
                "operation parameters must be an object, got {}",
                other
            ))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

/// One operation invocation with its arguments sorted into request parts.
///
/// Built and consumed within a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path_template: String,
    /// Path parameter values, already rendered to strings.
    pub path_params: BTreeMap<String, String>,
    /// Query arguments in declaration order: `(wire name, value)`.
    pub query_params: Vec<(String, Option<Value>)>,
    /// Body fields in declaration order, `None` if the operation has no body.
    pub body_fields: Option<Vec<(String, Option<Value>)>>,
}

impl RequestSpec {
    /// Sorts `args` into path, query and body parts for `op`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] for an argument `op` does not declare
    /// - [`ApiError::Validation`] for a missing, null or non-scalar path parameter
    pub fn build(op: &Operation, args: &Args) -> Result<Self> {
        for (name, _) in args.iter() {
            if !op.declares(name) {
                return Err(ApiError::Validation(format!(
                    "operation '{}' does not accept argument '{}'",
                    op.name, name
                )));
            }
        }

        let mut path_params = BTreeMap::new();
        for param in &op.path_params {
            let value = args
                .get(&param.arg)
                .ok_or_else(|| ApiError::missing_parameter(&param.wire))?;
            let rendered = scalar_to_string(value).ok_or_else(|| {
                ApiError::Validation(format!("parameter '{}' must be a scalar", param.wire))
            })?;
            path_params.insert(param.arg.clone(), rendered);
        }

        let query_params = op
            .query
            .iter()
            .map(|spec| (spec.wire.clone(), args.get(&spec.arg).cloned()))
            .collect();

        let body_fields = if op.has_body() {
            Some(
                op.body
                    .iter()
                    .map(|spec| (spec.wire.clone(), args.get(&spec.arg).cloned()))
                    .collect(),
            )
        } else {
            None
        };

        Ok(Self {
            method: op.method,
            path_template: op.path.clone(),
            path_params,
            query_params,
            body_fields,
        })
    }

    /// The template with every placeholder replaced by its encoded value.
    pub fn render_path(&self) -> String {
        let mut path = self.path_template.clone();
        for (name, value) in &self.path_params {
            let placeholder = format!("{{{}}}", name);
            path = path.replace(&placeholder, &urlencoding::encode(value));
        }
        path
    }

    /// Query pairs with absent values dropped and arrays expanded.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (wire, value) in &self.query_params {
            if let Some(value) = value {
                for encoded in encode_query_value(value) {
                    pairs.push((wire.clone(), encoded));
                }
            }
        }
        pairs
    }

    /// The JSON body, or `None` for operations without body fields.
    pub fn body(&self) -> Option<Value> {
        self.body_fields.as_ref().map(|fields| {
            let map: Map<String, Value> = fields
                .iter()
                .filter_map(|(wire, value)| value.clone().map(|v| (wire.clone(), v)))
                .collect();
            Value::Object(map)
        })
    }

    /// Produces the absolute request against `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if `root` plus the path is not a
    /// valid URL (possible after an unchecked root override).
    pub fn prepare(&self, root: &ApiRoot) -> Result<PreparedRequest> {
        let raw = format!("{}{}", root.as_str().trim_end_matches('/'), self.render_path());
        let mut url = Url::parse(&raw).map_err(|e| {
            ApiError::Configuration(format!("API root '{}' is not a valid URL: {}", root, e))
        })?;

        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(PreparedRequest {
            method: self.method,
            url,
            body: self.body(),
        })
    }
}

/// A fully assembled request, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub body: Option<Value>,
}

/// Builds and prepares a request in one step.
///
/// [`ConfluenceClient`](super::ConfluenceClient) keeps the two steps apart so
/// that validation runs before the API root is resolved.
pub fn assemble(op: &Operation, args: &Args, root: &ApiRoot) -> Result<PreparedRequest> {
    RequestSpec::build(op, args)?.prepare(root)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn encode_query_value(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| scalar_to_string(item).unwrap_or_else(|| item.to_string()))
            .collect(),
        Value::Object(_) => vec![value.to_string()],
        scalar => scalar_to_string(scalar).into_iter().collect(),
    }
}
