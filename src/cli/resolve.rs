//
//  confluence-client
//  cli/resolve.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Prints the tenant API root, running discovery unless one is configured.

use anyhow::Result;
use clap::Args;

use crate::output::write_json;

use super::GlobalOptions;

/// Print the tenant API root
#[derive(Args, Debug)]
pub struct ResolveCommand {}

impl ResolveCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let discovered = client.cached_api_root().is_none();
        let root = client.api_root().await?;

        if global.json {
            let result = serde_json::json!({
                "api_root": root,
                "gateway": client.gateway().base(),
                "discovered": discovered,
            });
            write_json(&result, true)?;
        } else {
            println!("{}", root);
        }
        Ok(())
    }
}
