//
//  confluence-client
//  cli/ops.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Operation catalog commands
//!
//! Reads the embedded registry only; needs neither a token nor the network.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::api::{registry, Operation};
use crate::output::{
    format_bool, format_method, print_field, print_header, truncate, OutputFormat,
    OutputWriter, TableBuilder, TableOutput, TableRow,
};

use super::GlobalOptions;

const PATH_WIDTH: usize = 60;

/// Browse the operation catalog
#[derive(Args, Debug)]
pub struct OpsCommand {
    #[command(subcommand)]
    pub command: OpsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum OpsSubcommand {
    /// List operations
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show one operation and its arguments
    Show(ShowArgs),

    /// List resource tags
    Tags,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only operations with this tag (case-insensitive)
    #[arg(long, short = 't')]
    pub tag: Option<String>,

    /// Only operations whose name contains this text
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Operation name
    pub name: String,
}

impl OpsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let writer = OutputWriter::new(OutputFormat::from_json_flag(global.json));
        match &self.command {
            OpsSubcommand::List(args) => self.list(args, &writer),
            OpsSubcommand::Show(args) => self.show(args, &writer),
            OpsSubcommand::Tags => self.tags(&writer),
        }
    }

    fn list(&self, args: &ListArgs, writer: &OutputWriter) -> Result<()> {
        let registry = registry();
        let mut operations: Vec<Operation> = match &args.tag {
            Some(tag) => registry.by_tag(tag).cloned().collect(),
            None => registry.operations().to_vec(),
        };
        if let Some(search) = &args.search {
            let needle = search.to_lowercase();
            operations.retain(|op| op.name.contains(&needle));
        }

        writer.write_list(&operations)?;
        if writer.format() == OutputFormat::Table && !operations.is_empty() {
            println!("{} operations", operations.len());
        }
        Ok(())
    }

    fn show(&self, args: &ShowArgs, writer: &OutputWriter) -> Result<()> {
        match registry().get(&args.name) {
            Some(op) => writer.write(op),
            None => bail!(
                "Unknown operation '{}'. Run 'cfl ops list' to see available operations",
                args.name
            ),
        }
    }

    fn tags(&self, writer: &OutputWriter) -> Result<()> {
        let registry = registry();
        let tags = registry.tags();

        if writer.format() == OutputFormat::Json {
            let result: Vec<_> = tags
                .iter()
                .map(|tag| {
                    serde_json::json!({
                        "tag": tag,
                        "operations": registry.operations().iter().filter(|op| op.tag == *tag).count(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        TableBuilder::new()
            .color(writer.color_enabled())
            .headers(["Tag", "Operations"])
            .rows(tags.iter().map(|tag| {
                let count = registry.operations().iter().filter(|op| op.tag == *tag).count();
                vec![tag.to_string(), count.to_string()]
            }))
            .print();
        Ok(())
    }
}

impl TableRow for Operation {
    fn headers() -> Vec<&'static str> {
        vec!["Name", "Method", "Path", "Tag"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            format_method(self.method.as_str(), color),
            truncate(&self.path, PATH_WIDTH),
            self.tag.clone(),
        ]
    }
}

impl TableOutput for Operation {
    fn print_table(&self, color: bool) {
        println!();
        print_header(&self.name);
        print_field("Method", &format_method(self.method.as_str(), color), color);
        print_field("Path", &self.path, color);
        print_field("Tag", &self.tag, color);
        print_field("Paginated", &format_bool(self.is_paginated(), color), color);
        print_field("Response", &format!("{:?}", self.response).to_lowercase(), color);
        println!();

        if self.arguments().is_empty() {
            println!("{}", style("No arguments").dim());
            return;
        }

        let path = self
            .path_params
            .iter()
            .map(|p| vec![p.arg.clone(), "path".to_string(), p.wire.clone(), format_bool(true, color)]);
        let query = self
            .query
            .iter()
            .map(|p| vec![p.arg.clone(), "query".to_string(), p.wire.clone(), format_bool(false, color)]);
        let body = self
            .body
            .iter()
            .map(|p| vec![p.arg.clone(), "body".to_string(), p.wire.clone(), format_bool(false, color)]);

        TableBuilder::new()
            .color(color)
            .headers(["Argument", "Location", "Wire name", "Required"])
            .rows(path.chain(query).chain(body))
            .print();
    }
}
