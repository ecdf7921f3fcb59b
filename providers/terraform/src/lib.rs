use std::{collections::HashMap, path::Path};

use anyhow::Result;
use common::{command::command, config::DEFAULT_TERRAFORM, provider::DeployTool};

pub mod backend;
pub mod executor;

pub use backend::{write_descriptor, DESCRIPTOR_FILE};
pub use executor::{run_destroy, TerminalStep};

/// The terraform binary, run with the console attached.
#[derive(Debug, Clone)]
pub struct Terraform {
    binary: String,
    env: HashMap<String, String>,
}

impl Default for Terraform {
    fn default() -> Self {
        Terraform::new(DEFAULT_TERRAFORM)
    }
}

impl Terraform {
    pub fn new(binary: impl Into<String>) -> Self {
        Terraform {
            binary: binary.into(),
            env: HashMap::new(),
        }
    }

    /// Exports `AWS_PROFILE` to every terraform invocation.
    pub fn with_profile(mut self, profile: Option<&str>) -> Self {
        if let Some(profile) = profile {
            self.env.insert("AWS_PROFILE".to_owned(), profile.to_owned());
        }
        self
    }
}

#[async_trait::async_trait]
impl DeployTool for Terraform {
    async fn run(&self, args: &[&str], dir: &Path, msgs: [&str; 3]) -> Result<()> {
        command(&self.binary, args, msgs, dir, &self.env).await
    }

    fn name(&self) -> String {
        self.binary.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::provider::INIT;

    #[test]
    fn test_profile_exported() {
        let tf = Terraform::default().with_profile(Some("ops"));
        assert_eq!(tf.env.get("AWS_PROFILE").map(String::as_str), Some("ops"));
        assert_eq!(tf.name(), "terraform");

        let tf = Terraform::default().with_profile(None);
        assert!(tf.env.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Terraform::new("true").run(&["init"], dir.path(), INIT).await.is_ok());
        assert!(Terraform::new("false").run(&["init"], dir.path(), INIT).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let tf = Terraform::new("terraform-binary-that-does-not-exist");
        assert!(tf.run(&["init"], dir.path(), INIT).await.is_err());
    }
}
