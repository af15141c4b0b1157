//
//  confluence-client
//  cli/call.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Operation invocation command
//!
//! Calls any catalog operation by name, similar to `gh api` but addressed by
//! operation instead of URL. Arguments use the operation's argument names;
//! `cfl ops show <name>` lists them.
//!
//! ## Examples
//!
//! ```bash
//! # Read a page with its storage body
//! cfl call get_page_by_id -a id=123 -a body_format=storage
//!
//! # Create a page; dotted names build nested objects, -r keeps
//! # number-like values such as ids and years as strings
//! cfl call create_page -r spaceId=65538 -r title=2024 \
//!     -a body.representation=storage -a body.value="<p>Shipped.</p>"
//!
//! # Every space, following cursors
//! cfl call get_spaces -a limit=250 --paginate
//! ```

use std::fs;

use anyhow::Result;
use clap::Args as ClapArgs;
use console::style;
use serde_json::{Map, Value};

use crate::api::common::{collect_pages, ApiError};
use crate::api::request::Args;
use crate::output::{write_json, CollectedOutput, OutputFormat, OutputWriter};

use super::GlobalOptions;

/// Invoke an operation by name
#[derive(ClapArgs, Debug)]
pub struct CallCommand {
    /// Operation name (see 'cfl ops list')
    pub operation: String,

    /// Argument as name=value; values are parsed as JSON when possible, so
    /// `title=2024` is sent as a number (use -r to keep it a string)
    #[arg(long = "arg", short = 'a', action = clap::ArgAction::Append)]
    pub args: Vec<String>,

    /// Argument as name=value, always sent as a string
    #[arg(long = "raw-arg", short = 'r', action = clap::ArgAction::Append)]
    pub raw_args: Vec<String>,

    /// Read arguments from a JSON object file (- for stdin)
    #[arg(long, short = 'f')]
    pub input: Option<String>,

    /// Follow cursors and concatenate every page of results
    #[arg(long)]
    pub paginate: bool,

    /// Page limit when paginating
    #[arg(long, default_value = "100")]
    pub max_pages: usize,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,
}

impl CallCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let args = self.build_args()?;
        let client = global.client()?;

        if self.paginate {
            let collected =
                collect_pages(&client, &self.operation, args, self.max_pages).await?;
            let writer = OutputWriter::new(OutputFormat::Json);
            if let Some(link) = &collected.unresumable_link {
                writer.write_warning(&format!(
                    "stopped after {} pages; the next link has no cursor: {}",
                    collected.pages, link
                ));
            } else if collected.truncated {
                writer.write_warning(&format!(
                    "stopped after {} pages; more results remain",
                    collected.pages
                ));
            }
            write_json(&CollectedOutput::from(collected), !self.compact)?;
        } else {
            let value = client.invoke(&self.operation, args).await?;
            if !value.is_null() {
                write_json(&value, !self.compact)?;
            } else if !global.json {
                eprintln!("{} {}", style("✓").green(), self.operation);
            }
        }

        Ok(())
    }

    /// Merges the input file, `-a` and `-r` arguments, in that order.
    fn build_args(&self) -> Result<Args, ApiError> {
        let mut values = Map::new();

        if let Some(input) = &self.input {
            for (name, value) in read_input(input)? {
                values.insert(name, value);
            }
        }

        for arg in &self.args {
            let (name, raw) = split_arg(arg)?;
            set_nested_value(&mut values, name, parse_value(raw));
        }

        for arg in &self.raw_args {
            let (name, raw) = split_arg(arg)?;
            set_nested_value(&mut values, name, Value::String(raw.to_string()));
        }

        Ok(values.into_iter().collect())
    }
}

fn read_input(input: &str) -> Result<Map<String, Value>, ApiError> {
    let content = if input == "-" {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| ApiError::Validation(format!("failed to read stdin: {}", e)))?;
        buffer
    } else {
        fs::read_to_string(input)
            .map_err(|e| ApiError::Validation(format!("failed to read {}: {}", input, e)))?
    };

    match serde_json::from_str(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::Validation(format!(
            "{} must contain a JSON object",
            input
        ))),
        Err(e) => Err(ApiError::Validation(format!("{} is not JSON: {}", input, e))),
    }
}

fn split_arg(arg: &str) -> Result<(&str, &str), ApiError> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(ApiError::Validation(format!(
            "invalid argument '{}', expected name=value",
            arg
        ))),
    }
}

/// Parses a command-line value as a JSON scalar, array or object, falling
/// back to a plain string.
///
/// Integers outside the `i64`/`u64` range stay strings rather than losing
/// digits to `f64`.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Value::Number(n.into());
    }
    if is_integer_text(raw) {
        return Value::String(raw.to_string());
    }
    if let Ok(n) = raw.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(n) {
            return Value::Number(number);
        }
    }
    if raw.starts_with('[') || raw.starts_with('{') {
        if let Ok(value) = serde_json::from_str(raw) {
            return value;
        }
    }
    Value::String(raw.to_string())
}

fn is_integer_text(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Sets `key` in `obj`, creating intermediate objects for dotted keys.
fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command(args: &[&str], raw: &[&str]) -> CallCommand {
        CallCommand {
            operation: "create_page".to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            raw_args: raw.iter().map(|s| s.to_string()).collect(),
            input: None,
            paginate: false,
            max_pages: 100,
            compact: false,
        }
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("25"), json!(25));
        assert_eq!(parse_value("1.5"), json!(1.5));
        assert_eq!(parse_value("[1,2]"), json!([1, 2]));
        assert_eq!(parse_value("[not json"), json!("[not json"));
        assert_eq!(parse_value("storage"), json!("storage"));
        assert_eq!(parse_value("null"), Value::Null);
    }

    #[test]
    fn test_large_integers_keep_their_digits() {
        assert_eq!(parse_value("18446744073709551615"), json!(18446744073709551615u64));
        assert_eq!(
            parse_value("12345678901234567890123"),
            json!("12345678901234567890123")
        );
        assert_eq!(
            parse_value("-98765432109876543210"),
            json!("-98765432109876543210")
        );
        assert_eq!(parse_value("1e3"), json!(1000.0));
    }

    #[test]
    fn test_raw_argument_keeps_numbers_as_strings() {
        let args = command(&["title=2024"], &[]).build_args().unwrap();
        assert_eq!(args.get("title"), Some(&json!(2024)));

        let args = command(&[], &["title=2024"]).build_args().unwrap();
        assert_eq!(args.get("title"), Some(&json!("2024")));
    }

    #[test]
    fn test_dotted_names_build_objects() {
        let cmd = command(
            &["title=Notes", "body.representation=storage", "body.value=<p>x</p>"],
            &["spaceId=65538"],
        );
        let args = cmd.build_args().unwrap();
        assert_eq!(args.get("title"), Some(&json!("Notes")));
        assert_eq!(
            args.get("body"),
            Some(&json!({"representation": "storage", "value": "<p>x</p>"}))
        );
        assert_eq!(args.get("spaceId"), Some(&json!("65538")));
    }

    #[test]
    fn test_malformed_argument_is_validation_error() {
        let err = command(&["no-equals-sign"], &[]).build_args().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_input_file_is_overridden_by_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("args.json");
        std::fs::write(&path, r#"{"id": "1", "status": "current"}"#).unwrap();

        let mut cmd = command(&["id=2"], &[]);
        cmd.input = Some(path.to_string_lossy().into_owned());
        let args = cmd.build_args().unwrap();
        assert_eq!(args.get("id"), Some(&json!(2)));
        assert_eq!(args.get("status"), Some(&json!("current")));
    }
}
