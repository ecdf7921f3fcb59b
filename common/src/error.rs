//! Failure taxonomy for a destroy run.

use std::{error::Error as StdError, io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DestroyError {
    #[error("could not list state objects in bucket {bucket}")]
    Listing {
        bucket: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not create workspace")]
    Workspace(#[source] io::Error),

    #[error("could not write backend descriptor {}", path.display())]
    DescriptorWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("init failed for {key}")]
    Init {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{step} failed for {key}")]
    Destroy {
        key: String,
        step: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not delete state object s3://{bucket}/{key}")]
    StatePrune {
        bucket: String,
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not remove workspace {}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Renders an error followed by each of its sources, `: ` separated.
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        out.push_str(": ");
        out.push_str(&s.to_string());
        source = s.source();
    }
    out
}
