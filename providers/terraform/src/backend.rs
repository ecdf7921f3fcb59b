//! Minimal root module pointing terraform at an existing S3 state object.

use std::{
    io,
    path::{Path, PathBuf},
};

use common::error::DestroyError;
use serde::{Deserialize, Serialize};
use tokio::fs;

pub const DESCRIPTOR_FILE: &str = "main.tf.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Root {
    pub provider: Provider,
    pub terraform: TerraformBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub aws: AwsProvider,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwsProvider {
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerraformBlock {
    pub backend: Backend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backend {
    pub s3: S3Backend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Backend {
    pub region: String,
    pub bucket: String,
    pub key: String,
}

impl Root {
    pub fn new(region: &str, bucket: &str, key: &str) -> Self {
        Root {
            provider: Provider {
                aws: AwsProvider {
                    region: region.to_owned(),
                },
            },
            terraform: TerraformBlock {
                backend: Backend {
                    s3: S3Backend {
                        region: region.to_owned(),
                        bucket: bucket.to_owned(),
                        key: key.to_owned(),
                    },
                },
            },
        }
    }
}

/// Writes the backend descriptor for `key` into `dir`, returning its path.
pub async fn write_descriptor(
    dir: &Path,
    region: &str,
    bucket: &str,
    key: &str,
) -> Result<PathBuf, DestroyError> {
    let path = dir.join(DESCRIPTOR_FILE);
    let written = match serde_json::to_string_pretty(&Root::new(region, bucket, key)) {
        Ok(body) => fs::write(&path, body).await,
        Err(err) => Err(io::Error::from(err)),
    };

    match written {
        Ok(()) => {
            tracing::debug!("wrote {}", path.display());
            Ok(path)
        }
        Err(source) => Err(DestroyError::DescriptorWrite { path, source }),
    }
}
