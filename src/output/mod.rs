//
//  confluence-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Terminal rendering for `cfl`:
//!
//! - **Table format**: Human-readable tables for interactive use
//! - **JSON format**: Machine-readable output for scripting
//!
//! API responses are always printed as JSON; tables are used for the
//! catalog and configuration listings.
//!
//! ## Example
//!
//! ```rust,ignore
//! use confluence_client::output::{OutputWriter, OutputFormat};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&operation)?;
//! writer.write_warning("Stopped after 100 pages");
//! ```

mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde::Serialize;

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// Picks the format from the global `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes values and status messages in the configured format.
///
/// Colors are detected from the terminal and disabled when output is piped.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single value as pretty JSON or as a table.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(value, true),
            OutputFormat::Table => {
                value.print_table(self.color);
                Ok(())
            }
        }
    }

    /// Writes a list as a JSON array, or as one table with a row per item.
    pub fn write_list<T: Serialize + TableRow>(&self, values: &[T]) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(&values, true),
            OutputFormat::Table => {
                if values.is_empty() {
                    println!("No results");
                    return Ok(());
                }
                TableBuilder::new()
                    .color(self.color)
                    .headers(T::headers())
                    .rows(values.iter().map(|v| v.row(self.color)))
                    .print();
                Ok(())
            }
        }
    }

    /// Writes a warning message to stderr.
    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }
}

/// Types that render themselves as a detail view.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Types that render as one row of a list table.
pub trait TableRow {
    fn headers() -> Vec<&'static str>;
    fn row(&self, color: bool) -> Vec<String>;
}

/// Prints a bold section header with an underline.
pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line with the key dimmed.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_json_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Table);
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_writer_keeps_format() {
        let writer = OutputWriter::new(OutputFormat::Json);
        assert_eq!(writer.format(), OutputFormat::Json);
    }
}
