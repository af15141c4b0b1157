//
//  confluence-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod call;
mod config;
mod ops;
mod resolve;

pub use call::CallCommand;
pub use config::ConfigCommand;
pub use ops::OpsCommand;
pub use resolve::ResolveCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::ConfluenceClient;
use crate::auth::{resolve_token, AuthCredential};
use crate::config::Config;

/// cfl - Call the Confluence Cloud REST API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "cfl",
    version,
    about = "Call the Confluence Cloud REST API from the command line",
    long_about = "cfl exposes every Confluence Cloud v2 operation by name.\n\n\
                  It discovers your site through the OAuth gateway, assembles the request \
                  and prints the JSON response.",
    propagate_version = true,
    after_help = "Use 'cfl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Fixed API root; skips discovery
    #[arg(long, global = true)]
    pub api_root: Option<String>,

    /// OAuth gateway used for discovery
    #[arg(long, global = true)]
    pub gateway_url: Option<String>,

    /// Access token ('-' reads it from stdin)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Loads the configuration and layers the command-line flags on top.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(gateway) = &self.gateway_url {
            config.api.gateway_url = gateway.clone();
        }
        if let Some(root) = &self.api_root {
            config.api.api_root = Some(root.clone());
        }
        Ok(config)
    }

    /// Builds a client from configuration, flags and the access token.
    pub fn client(&self) -> Result<ConfluenceClient> {
        let config = self.config()?;
        let token = resolve_token(self.token.as_deref(), &config.auth.token_env)?;
        let client = ConfluenceClient::from_config(&config.api, AuthCredential::bearer(token))?;
        tracing::debug!("{:?}", client);
        Ok(client)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the operation catalog
    Ops(OpsCommand),

    /// Invoke an operation by name
    #[command(visible_alias = "c")]
    Call(CallCommand),

    /// Print the tenant API root
    Resolve(ResolveCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}
