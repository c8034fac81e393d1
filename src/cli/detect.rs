// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::client::{DetectClient, DEFAULT_SERVER_URL};
use crate::currency::{format_rupiah, nominal_for_class};
use crate::tally::MoneyTally;

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Image files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Detection server base URL
    #[arg(long, env = "DETECT_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,
}

/// Arguments for the count command
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Image files to upload and tally
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Detection server base URL
    #[arg(long, env = "DETECT_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server: String,

    /// Ignore predictions below this confidence
    #[arg(long, default_value_t = 0.0)]
    pub min_confidence: f32,

    /// Print the tally as CSV instead of a table
    #[arg(long)]
    pub csv: bool,
}

/// Upload each file and print its predictions
pub async fn detect(args: DetectArgs) -> Result<()> {
    let client = DetectClient::new(&args.server)?;

    for path in &args.files {
        let response = client
            .detect_file(path)
            .await
            .with_context(|| format!("detection failed for {}", path.display()))?;

        println!("📷 {}: {} prediction(s)", path.display(), response.predictions.len());
        for prediction in &response.predictions {
            let nominal = nominal_for_class(prediction.class_id);
            let label = if nominal > 0 {
                format_rupiah(nominal)
            } else {
                "unknown".to_string()
            };
            println!(
                "   class {} ({}) confidence {:.2}% box {:?}",
                prediction.class_id,
                label,
                prediction.confidence * 100.0,
                prediction.bbox.0
            );
        }
    }

    Ok(())
}

/// Upload each file and print the combined money tally
///
/// Files that fail to upload are reported and skipped; the partial tally is
/// still printed, then the command fails with the number of failures.
pub async fn count(args: CountArgs) -> Result<()> {
    if !(0.0..=1.0).contains(&args.min_confidence) {
        return Err(anyhow!(
            "--min-confidence must be between 0 and 1, got {}",
            args.min_confidence
        ));
    }

    let client = DetectClient::new(&args.server)?;
    let mut tally = MoneyTally::with_min_confidence(args.min_confidence);
    let mut failed = Vec::new();

    for path in &args.files {
        match client.detect_file(path).await {
            Ok(response) => {
                let counted = tally.record(&response.predictions);
                info!("{}: counted {} banknote(s)", path.display(), counted);
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                failed.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    if args.csv {
        print!("{}", tally.to_csv());
    } else {
        print!("{}", tally.summary());
    }

    if !failed.is_empty() {
        return Err(anyhow!(
            "{} of {} file(s) could not be counted:\n  {}",
            failed.len(),
            args.files.len(),
            failed.join("\n  ")
        ));
    }

    Ok(())
}
