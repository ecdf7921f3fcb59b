use common::{
    command::{ARROW, GREEN_TICK, RED_CROSS},
    config::{FailurePolicy, RunConfig},
    error::{error_chain, DestroyError},
    provider::{DeployTool, StateStore},
};
use terraform::{run_destroy, write_descriptor, TerminalStep};
use tracing::{error, info};

use crate::{keys::resolve_keys, workspace::Workspace};

/// Outcome of a run over every resolved key.
#[derive(Debug, Default)]
pub struct RunReport {
    pub destroyed: Vec<String>,
    pub failed: Vec<(String, DestroyError)>,
    /// Keys never attempted because of [`FailurePolicy::FailFast`]
    pub skipped: Vec<String>,
}

impl RunReport {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Pipeline<'a, S: ?Sized, T: ?Sized> {
    store: &'a S,
    tool: &'a T,
    config: &'a RunConfig,
}

impl<'a, S, T> Pipeline<'a, S, T>
where
    S: StateStore + ?Sized,
    T: DeployTool + ?Sized,
{
    pub fn new(store: &'a S, tool: &'a T, config: &'a RunConfig) -> Self {
        Pipeline {
            store,
            tool,
            config,
        }
    }

    /// Resolves the keys, then destroys them one at a time. Only a listing
    /// failure is returned as `Err`; per-key failures land in the report.
    pub async fn run(&self) -> Result<RunReport, DestroyError> {
        let keys = resolve_keys(
            self.store,
            &self.config.bucket,
            &self.config.keys,
            &self.config.patterns,
        )
        .await?;
        info!("resolved {} state keys", keys.len());

        let step = TerminalStep::for_mode(self.config.dry_run, self.config.auto_approve);
        let mut report = RunReport::default();
        let mut keys = keys.into_iter();
        while let Some(key) = keys.next() {
            println!(
                "{} {} s3://{}/{}",
                ARROW.to_string(),
                if step.is_destructive() {
                    "Destroying"
                } else {
                    "Planning destroy of"
                },
                self.config.bucket,
                key
            );

            match self.destroy_key(&key, step).await {
                Ok(()) => {
                    println!("{} {}", GREEN_TICK.to_string(), key);
                    report.destroyed.push(key);
                }
                Err(err) => {
                    eprintln!("{} {}: {}", RED_CROSS.to_string(), key, error_chain(&err));
                    report.failed.push((key, err));
                    if self.config.on_failure == FailurePolicy::FailFast {
                        report.skipped.extend(keys.by_ref());
                        break;
                    }
                }
            }
        }

        Ok(report)
    }

    /// One isolated iteration. The workspace is released whatever happens;
    /// a release failure replaces any earlier error.
    async fn destroy_key(&self, key: &str, step: TerminalStep) -> Result<(), DestroyError> {
        let workspace = Workspace::acquire(self.config.workspace_root.as_deref())?;
        let outcome = self.destroy_in(&workspace, key, step).await;

        if let Err(release_err) = workspace.release() {
            if let Err(err) = &outcome {
                error!("{key}: {}", error_chain(err));
            }
            return Err(release_err);
        }
        outcome
    }

    async fn destroy_in(
        &self,
        workspace: &Workspace,
        key: &str,
        step: TerminalStep,
    ) -> Result<(), DestroyError> {
        let config = self.config;
        write_descriptor(workspace.path(), &config.region, &config.bucket, key).await?;

        run_destroy(self.tool, workspace.path(), key, step).await?;

        if config.delete_state {
            self.prune_state(key).await?;
        }
        Ok(())
    }

    async fn prune_state(&self, key: &str) -> Result<(), DestroyError> {
        let bucket = &self.config.bucket;
        if self.config.dry_run {
            println!("{} Would delete s3://{bucket}/{key}", ARROW.to_string());
            return Ok(());
        }

        self.store
            .delete_object(bucket, key)
            .await
            .map_err(|source| DestroyError::StatePrune {
                bucket: bucket.clone(),
                key: key.to_owned(),
                source,
            })?;
        println!("{} Deleted s3://{bucket}/{key}", GREEN_TICK.to_string());
        Ok(())
    }
}
