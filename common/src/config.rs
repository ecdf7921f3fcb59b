use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use tracing::info;

use crate::exit;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_TERRAFORM: &str = "terraform";

/// Run settings as read from the settings file or the command line. Every
/// field is optional here; [`RunConfig`] is the validated form.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub keys: Vec<String>,
    pub patterns: Vec<String>,
    pub delete_state: bool,
    pub auto_approve: bool,
    pub dry_run: bool,
    pub fail_fast: bool,
    pub terraform: Option<String>,
    pub workspace_root: Option<PathBuf>,
}

impl Settings {
    /// Layers `overrides` on top of `self`. Scalars and non-empty lists from
    /// `overrides` win, switches are enabled if either side enables them.
    pub fn merge(self, overrides: Settings) -> Settings {
        fn list(base: Vec<String>, over: Vec<String>) -> Vec<String> {
            if over.is_empty() {
                base
            } else {
                over
            }
        }

        Settings {
            profile: overrides.profile.or(self.profile),
            region: overrides.region.or(self.region),
            bucket: overrides.bucket.or(self.bucket),
            keys: list(self.keys, overrides.keys),
            patterns: list(self.patterns, overrides.patterns),
            delete_state: self.delete_state || overrides.delete_state,
            auto_approve: self.auto_approve || overrides.auto_approve,
            dry_run: self.dry_run || overrides.dry_run,
            fail_fast: self.fail_fast || overrides.fail_fast,
            terraform: overrides.terraform.or(self.terraform),
            workspace_root: overrides.workspace_root.or(self.workspace_root),
        }
    }
}

/// What the pipeline does with the remaining keys once one has failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Continue,
    FailFast,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub profile: Option<String>,
    pub region: String,
    pub bucket: String,
    pub keys: Vec<String>,
    pub patterns: Vec<Regex>,
    pub delete_state: bool,
    pub auto_approve: bool,
    pub dry_run: bool,
    pub on_failure: FailurePolicy,
    pub terraform: String,
    /// Parent of the per-key workspaces, the system temp dir when `None`
    pub workspace_root: Option<PathBuf>,
}

impl TryFrom<Settings> for RunConfig {
    type Error = anyhow::Error;

    fn try_from(settings: Settings) -> Result<Self> {
        let Some(bucket) = settings.bucket else {
            bail!("a bucket is required (--bucket)");
        };
        if settings.keys.is_empty() && settings.patterns.is_empty() {
            bail!("at least one of --key or --pattern is required");
        }

        let patterns = settings
            .patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("invalid pattern {p:?}")))
            .collect::<Result<Vec<_>>>()?;

        Ok(RunConfig {
            profile: settings.profile,
            region: settings
                .region
                .unwrap_or_else(|| DEFAULT_REGION.to_owned()),
            bucket,
            keys: settings.keys,
            patterns,
            delete_state: settings.delete_state,
            auto_approve: settings.auto_approve,
            dry_run: settings.dry_run,
            on_failure: if settings.fail_fast {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::Continue
            },
            terraform: settings
                .terraform
                .unwrap_or_else(|| DEFAULT_TERRAFORM.to_owned()),
            workspace_root: settings.workspace_root,
        })
    }
}

pub fn parse_config(file: &str) -> Result<Settings> {
    let config = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(err) => exit!(err, "Could not read config file {}", file),
    };

    let config: Result<Settings, toml::de::Error> = toml::from_str(config.as_str());
    let config = match config {
        Ok(c) => c,
        Err(err) => exit!(err, "Could not parse config file {}", file),
    };

    info!("config file parsed");
    Ok(config)
}
