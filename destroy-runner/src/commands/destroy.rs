use std::process::ExitCode;

use anyhow::Result;
use common::{
    command::{GREEN_TICK, RED_CROSS},
    config::{parse_config, RunConfig, Settings},
    error::error_chain,
};
use s3::S3Store;
use terraform::Terraform;
use tracing::info;

use crate::{args::Cli, pipeline::Pipeline};

/// Validated configuration: settings file (if any) overlaid with the command line.
pub fn run_config(cli: &Cli) -> Result<RunConfig> {
    let file = match &cli.file {
        Some(f) => parse_config(f)?,
        None => Settings::default(),
    };
    RunConfig::try_from(file.merge(cli.settings()))
}

pub async fn destroy(cli: &Cli) -> Result<ExitCode> {
    let config = run_config(cli)?;
    info!(
        "bucket {} in {}, dry run: {}, delete state: {}",
        config.bucket, config.region, config.dry_run, config.delete_state
    );

    let store = S3Store::from_env(&config.region, config.profile.as_deref()).await;
    let tool = Terraform::new(config.terraform.as_str()).with_profile(config.profile.as_deref());

    let report = match Pipeline::new(&store, &tool, &config).run().await {
        Ok(r) => r,
        Err(err) => {
            eprintln!("{} {}", RED_CROSS.to_string(), error_chain(&err));
            return Ok(ExitCode::FAILURE);
        }
    };

    let verb = if config.dry_run { "Planned" } else { "Destroyed" };
    if report.success() {
        println!(
            "{} {verb} {} state file(s)",
            GREEN_TICK.to_string(),
            report.destroyed.len()
        );
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!(
        "{} {verb} {}, failed {}, skipped {}",
        RED_CROSS.to_string(),
        report.destroyed.len(),
        report.failed.len(),
        report.skipped.len()
    );
    for (key, err) in &report.failed {
        eprintln!("  {key}: {}", error_chain(err));
    }
    Ok(ExitCode::FAILURE)
}
