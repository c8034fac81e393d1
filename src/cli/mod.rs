// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod detect;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Currency detection CLI
#[derive(Parser, Debug)]
#[command(name = "detect-cli")]
#[command(version)]
#[command(about = "Upload banknote photos to a detection server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the predictions for each file
    Detect(detect::DetectArgs),

    /// Total up the banknotes found across all files
    Count(detect::CountArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect(args) => detect::detect(args).await,
        Commands::Count(args) => detect::count(args).await,
    }
}
