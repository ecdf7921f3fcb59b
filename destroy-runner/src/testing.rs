//! In-memory stand-ins for S3 and terraform.

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{bail, Result};
use common::provider::{DeployTool, ListingPage, StateStore};
use serde_json::Value;
use terraform::DESCRIPTOR_FILE;

/// Serves fixed pages chained by `page-N` cursors.
#[derive(Default)]
pub struct MemoryStore {
    pub pages: Vec<Vec<String>>,
    /// Zero-based listing call that fails
    pub fail_list_at: Option<usize>,
    pub fail_delete: bool,
    list_calls: Mutex<Vec<Option<String>>>,
    deletes: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn with_pages(pages: Vec<Vec<&str>>) -> Self {
        MemoryStore {
            pages: pages
                .into_iter()
                .map(|p| p.into_iter().map(str::to_owned).collect())
                .collect(),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<(String, String)> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl StateStore for MemoryStore {
    async fn list_page(&self, _bucket: &str, cursor: Option<&str>) -> Result<ListingPage> {
        let call = {
            let mut calls = self.list_calls.lock().unwrap();
            calls.push(cursor.map(str::to_owned));
            calls.len() - 1
        };
        if self.fail_list_at == Some(call) {
            bail!("AccessDenied");
        }

        let index = match cursor {
            None => 0,
            Some(c) => c.trim_start_matches("page-").parse()?,
        };
        let keys = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(ListingPage {
            keys,
            truncated: next_cursor.is_some(),
            next_cursor,
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        if self.fail_delete {
            bail!("NoSuchBucket");
        }
        self.deletes
            .lock()
            .unwrap()
            .push((bucket.to_owned(), key.to_owned()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Call {
    pub args: String,
    pub dir: PathBuf,
    /// Backend descriptor found in `dir` at call time
    pub descriptor: Option<String>,
}

impl Call {
    pub fn backend_key(&self) -> String {
        let descriptor: Value = serde_json::from_str(self.descriptor.as_deref().unwrap_or("{}"))
            .unwrap_or_default();
        descriptor["terraform"]["backend"]["s3"]["key"]
            .as_str()
            .unwrap_or_default()
            .to_owned()
    }
}

/// Records every invocation; fails the `fail_on` step for one backend key.
#[derive(Default)]
pub struct RecordingTool {
    calls: Mutex<Vec<Call>>,
    fail_on: Option<(&'static str, &'static str)>,
    /// Remove the workspace before every failing step
    wipe_on_failure: bool,
}

impl RecordingTool {
    pub fn failing_on(command: &'static str, key: &'static str) -> Self {
        RecordingTool {
            fail_on: Some((command, key)),
            ..Default::default()
        }
    }

    pub fn wiping_workspace(mut self) -> Self {
        self.wipe_on_failure = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.args).collect()
    }
}

#[async_trait::async_trait]
impl DeployTool for RecordingTool {
    async fn run(&self, args: &[&str], dir: &Path, _msgs: [&str; 3]) -> Result<()> {
        let call = Call {
            args: args.join(" "),
            dir: dir.to_owned(),
            descriptor: std::fs::read_to_string(dir.join(DESCRIPTOR_FILE)).ok(),
        };
        let fails = self
            .fail_on
            .is_some_and(|(command, key)| args[0] == command && call.backend_key() == key);
        self.calls.lock().unwrap().push(call);

        if fails {
            if self.wipe_on_failure {
                std::fs::remove_dir_all(dir)?;
            }
            bail!("exit status: 1");
        }
        Ok(())
    }

    fn name(&self) -> String {
        "terraform".to_owned()
    }
}
