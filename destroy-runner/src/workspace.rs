use std::path::Path;

use common::error::DestroyError;
use tempfile::TempDir;

const PREFIX: &str = "tf-destroy-";

/// Scratch directory for one state key. The process working directory is
/// never changed; tools get the path as their `current_dir`.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a new, empty, uniquely named directory under `root`, or the
    /// system temp dir.
    pub fn acquire(root: Option<&Path>) -> Result<Self, DestroyError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(PREFIX);
        let dir = match root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(DestroyError::Workspace)?;
        tracing::debug!("acquired workspace {}", dir.path().display());
        Ok(Workspace { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Removes the directory and everything in it.
    pub fn release(self) -> Result<(), DestroyError> {
        let path = self.dir.path().to_owned();
        self.dir
            .close()
            .map_err(|source| DestroyError::Cleanup {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("released workspace {}", path.display());
        Ok(())
    }
}
