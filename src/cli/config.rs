//
//  confluence-client
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! `get` and `list` show effective values, environment overrides included.
//! `set` and `unset` edit the file only.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Clear an optional configuration value
    Unset(GetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key (e.g. api.api_root)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g. api.api_root)
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(&args.key, &args.value, global),
            ConfigSubcommand::Unset(args) => self.set(&args.key, "", global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        ensure_known(&args.key)?;
        let config = Config::load()?;
        let value = config.get(&args.key);

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }
        Ok(())
    }

    fn set(&self, key: &str, value: &str, global: &GlobalOptions) -> Result<()> {
        ensure_known(key)?;
        let path = Config::config_path()?;
        let mut config = Config::load_from(&path)?;

        if !config.set(key, value)? {
            bail!(unknown_key(key));
        }
        config.save_to(&path)?;
        tracing::debug!("Wrote {} to {}", key, path.display());

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": key,
                "value": config.get(key),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if value.is_empty() {
            println!("{} Unset {}", style("✓").green(), style(key).cyan());
        } else {
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(key).cyan(),
                value
            );
        }
        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        println!();
        println!("{}", style("Configuration").bold());
        println!("{}", "-".repeat(50));
        for key in KEYS {
            match config.get(key) {
                Some(value) => println!("  {}: {}", style(key).cyan(), value),
                None => println!("  {}: {}", style(key).cyan(), style("(not set)").dim()),
            }
        }
        println!();
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;

        if global.json {
            let result = serde_json::json!({
                "path": path.display().to_string(),
                "exists": crate::config::config_exists(&path),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}

fn ensure_known(key: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        bail!(unknown_key(key));
    }
    Ok(())
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown configuration key '{}'. Valid keys: {}",
        key,
        KEYS.join(", ")
    )
}
