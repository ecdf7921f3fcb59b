use std::path::Path;

use anyhow::Result;

pub const INIT: [&str; 3] = [
    "Initialising backend",
    "Could not initialise backend",
    "Backend initialised",
];

pub const PLAN_DESTROY: [&str; 3] = [
    "Planning teardown of platform resources",
    "Could not plan teardown of platform resources",
    "Planned teardown of platform resources",
];

pub const DESTROY: [&str; 3] = [
    "Tearing down platform resources",
    "Could not destroy platform resources",
    "Destroyed platform resources",
];

/// One response of a paginated object listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
    pub keys: Vec<String>,
    /// Cursor to pass to the next call, `None` on the last page
    pub next_cursor: Option<String>,
    pub truncated: bool,
}

/// Remote object store holding the state files.
#[async_trait::async_trait]
pub trait StateStore: Send + Sync {
    /// Fetch the page of object keys following `cursor` (first page when `None`).
    async fn list_page(&self, bucket: &str, cursor: Option<&str>) -> Result<ListingPage>;
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;
}

/// External deployment tool driven against a prepared workspace.
#[async_trait::async_trait]
pub trait DeployTool: Send + Sync {
    /// Run the tool with `args` from inside `dir`. A non-zero exit is an error.
    async fn run(&self, args: &[&str], dir: &Path, msgs: [&str; 3]) -> Result<()>;
    fn name(&self) -> String;
}
