use std::path::PathBuf;

use clap::{ArgAction, Parser};
use common::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "tf-destroy")]
#[command(author, version, about = "Destroy terraform deployments from their S3 state files alone", long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(long, short, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Settings file (TOML), command line values take precedence
    #[arg(long, short)]
    pub file: Option<String>,

    /// AWS profile used for S3 and exported to terraform
    #[arg(long)]
    pub profile: Option<String>,

    /// AWS region of the bucket and provider [default: us-east-1]
    #[arg(long)]
    pub region: Option<String>,

    /// Bucket holding the state files
    #[arg(long)]
    pub bucket: Option<String>,

    /// State file key to destroy, may be repeated
    #[arg(long = "key", value_name = "KEY")]
    pub keys: Vec<String>,

    /// Destroy every state file whose key matches this regex, may be repeated
    #[arg(long = "pattern", value_name = "REGEX")]
    pub patterns: Vec<String>,

    /// Delete the state file after a successful destroy
    #[arg(long, action = ArgAction::SetTrue)]
    pub delete_state: bool,

    /// Skip terraform's interactive confirmation
    #[arg(long, action = ArgAction::SetTrue)]
    pub auto_approve: bool,

    /// Run `terraform plan -destroy` and delete nothing
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Stop at the first state file that fails instead of moving on
    #[arg(long, action = ArgAction::SetTrue)]
    pub fail_fast: bool,

    /// Terraform binary [default: terraform]
    #[arg(long, value_name = "BINARY")]
    pub terraform: Option<String>,

    /// Directory to create per-key workspaces in [default: system temp dir]
    #[arg(long, value_name = "DIR")]
    pub workspace_root: Option<PathBuf>,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            profile: self.profile.clone(),
            region: self.region.clone(),
            bucket: self.bucket.clone(),
            keys: self.keys.clone(),
            patterns: self.patterns.clone(),
            delete_state: self.delete_state,
            auto_approve: self.auto_approve,
            dry_run: self.dry_run,
            fail_fast: self.fail_fast,
            terraform: self.terraform.clone(),
            workspace_root: self.workspace_root.clone(),
        }
    }
}
