// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::Args;

#[tokio::main]
async fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let client = commands::build_client(&args)?;
	info!(base_url = %client.config().base_url(), "using Weito API");

	let body = commands::run(&client, args.command.clone(), args.token.as_ref()).await?;
	println!("{}", serde_json::to_string_pretty(&body)?);
	Ok(())
}
