use std::collections::HashSet;

use common::{command::progress, error::DestroyError, provider::StateStore};
use regex::Regex;
use tracing::debug;

/// Resolves the state keys to destroy: `explicit` first, in the given
/// order, then every listed key matching any of `patterns`, in listing
/// order. A key is only ever returned once.
pub async fn resolve_keys<S: StateStore + ?Sized>(
    store: &S,
    bucket: &str,
    explicit: &[String],
    patterns: &[Regex],
) -> Result<Vec<String>, DestroyError> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    let mut push = |key: &str| {
        if seen.insert(key.to_owned()) {
            keys.push(key.to_owned());
        } else {
            debug!("{key} already selected");
        }
    };

    explicit.iter().for_each(|k| push(k.as_str()));

    if patterns.is_empty() {
        return Ok(keys);
    }

    let pb = progress(&format!("Listing state files in s3://{bucket}"));
    let mut cursor: Option<String> = None;
    let mut pages = 0;
    loop {
        let page = match store.list_page(bucket, cursor.as_deref()).await {
            Ok(p) => p,
            Err(source) => {
                pb.finish_and_clear();
                return Err(DestroyError::Listing {
                    bucket: bucket.to_owned(),
                    source,
                });
            }
        };
        pages += 1;
        debug!(
            "page {pages}: {} keys, truncated: {}",
            page.keys.len(),
            page.truncated
        );

        page.keys
            .iter()
            .filter(|k| patterns.iter().any(|p| p.is_match(k)))
            .for_each(|k| push(k.as_str()));

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }
    pb.finish_and_clear();

    Ok(keys)
}
