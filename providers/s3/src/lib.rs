//! S3 access for state objects: paginated listing and deletion.

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use common::provider::{ListingPage, StateStore};

pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub fn new(client: Client) -> Self {
        S3Store { client }
    }

    /// Builds a client from the default credential chain, pinned to `region`
    /// and optionally to a named profile.
    pub async fn from_env(region: &str, profile: Option<&str>) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_owned()));
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }

        let shared_config = loader.load().await;
        S3Store::new(Client::new(&shared_config))
    }
}

#[async_trait::async_trait]
impl StateStore for S3Store {
    async fn list_page(&self, bucket: &str, cursor: Option<&str>) -> Result<ListingPage> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(cursor.map(str::to_owned))
            .send()
            .await
            .with_context(|| format!("ListObjectsV2 on {bucket}"))?;

        let keys: Vec<String> = output
            .contents()
            .iter()
            .filter_map(|o| o.key().map(str::to_owned))
            .collect();
        tracing::debug!("listed {} objects in {bucket}", keys.len());

        Ok(ListingPage {
            keys,
            next_cursor: output.next_continuation_token().map(str::to_owned),
            truncated: output.is_truncated().unwrap_or(false),
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("DeleteObject s3://{bucket}/{key}"))?;
        Ok(())
    }
}
