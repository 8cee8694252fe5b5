//! Bounded-parallel commit message resolution

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, instrument};

use mergelog_core::error::HistoryError;
use mergelog_core::message::{MessageFilter, TextSanitizer};
use mergelog_core::record::{ResolvedMessage, VersionBucket, VersionLog};

use crate::provider::{HistoryProvider, Result};

/// Maximum buckets resolving at once
const MAX_CONCURRENT_BUCKETS: usize = 4;

/// Maximum message fetches in flight within one bucket
const MAX_CONCURRENT_FETCHES: usize = 4;

/// Options controlling message retention and shape
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// Keep every commit's message, not just merge requests
    pub include_all: bool,
    /// Keep only the first retained line of each message
    pub short: bool,
}

/// Resolves the messages of version buckets with bounded fan-out
///
/// Fetches run at most [`MAX_CONCURRENT_FETCHES`] per bucket and at most
/// [`MAX_CONCURRENT_BUCKETS`] buckets at a time, so the total subprocess
/// fan-out stays bounded. The first fetch error fails the whole stage and
/// aborts its siblings; results are reassembled in commit order, never in
/// completion order.
pub struct MessageResolver {
    provider: Arc<dyn HistoryProvider>,
    sanitizer: Arc<dyn TextSanitizer>,
    options: ResolveOptions,
}

impl MessageResolver {
    /// Create a resolver
    pub fn new(
        provider: Arc<dyn HistoryProvider>,
        sanitizer: Arc<dyn TextSanitizer>,
        options: ResolveOptions,
    ) -> Self {
        Self {
            provider,
            sanitizer,
            options,
        }
    }

    /// Resolve all buckets into renderable version logs.
    ///
    /// Buckets whose every message filters out are dropped; bucket order
    /// otherwise matches the input.
    #[instrument(skip(self, buckets), fields(bucket_count = buckets.len()))]
    pub async fn resolve(&self, buckets: Vec<VersionBucket>) -> Result<Vec<VersionLog>> {
        let bucket_limit = Arc::new(Semaphore::new(MAX_CONCURRENT_BUCKETS));

        let mut slots: Vec<Option<VersionLog>> = Vec::new();
        slots.resize_with(buckets.len(), || None);

        let mut workers = JoinSet::new();
        for (index, bucket) in buckets.into_iter().enumerate() {
            let provider = self.provider.clone();
            let sanitizer = self.sanitizer.clone();
            let options = self.options;
            let bucket_limit = bucket_limit.clone();

            workers.spawn(async move {
                let _permit = bucket_limit.acquire_owned().await.unwrap();
                let log = resolve_bucket(provider, sanitizer, options, bucket).await?;
                Ok::<_, HistoryError>((index, log))
            });
        }

        // Dropping the JoinSet on the first error aborts the remaining
        // workers, so no further subprocesses are spawned after a failure.
        while let Some(joined) = workers.join_next().await {
            let (index, log) =
                joined.map_err(|e| HistoryError::ResolutionAborted(e.to_string()))??;
            slots[index] = log;
        }

        let logs: Vec<VersionLog> = slots.into_iter().flatten().collect();
        debug!(version_count = logs.len(), "messages resolved");
        Ok(logs)
    }
}

/// Resolve one bucket, preserving commit order
async fn resolve_bucket(
    provider: Arc<dyn HistoryProvider>,
    sanitizer: Arc<dyn TextSanitizer>,
    options: ResolveOptions,
    bucket: VersionBucket,
) -> Result<Option<VersionLog>> {
    let fetch_limit = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));

    let mut slots: Vec<Option<ResolvedMessage>> = Vec::new();
    slots.resize_with(bucket.commits.len(), || None);

    let mut fetches = JoinSet::new();
    for (index, hash) in bucket.commits.iter().enumerate() {
        let provider = provider.clone();
        let sanitizer = sanitizer.clone();
        let hash = hash.clone();
        let fetch_limit = fetch_limit.clone();

        fetches.spawn(async move {
            let _permit = fetch_limit.acquire_owned().await.unwrap();
            let raw = provider.commit_message(&hash).await?;
            Ok::<_, HistoryError>((index, resolve_message(hash, &raw, &*sanitizer, options)))
        });
    }

    while let Some(joined) = fetches.join_next().await {
        let (index, message) =
            joined.map_err(|e| HistoryError::ResolutionAborted(e.to_string()))??;
        slots[index] = Some(message);
    }

    let messages: Vec<String> = slots
        .into_iter()
        .flatten()
        .filter(|m| !m.is_empty())
        .map(|m| m.text)
        .collect();

    if messages.is_empty() {
        debug!(version = %bucket.version, "bucket filtered out entirely");
        return Ok(None);
    }

    Ok(Some(VersionLog {
        version: bucket.version,
        messages,
    }))
}

/// Apply the filtering rules, retention policy and sanitizer to one raw body
fn resolve_message(
    hash: String,
    raw: &str,
    sanitizer: &dyn TextSanitizer,
    options: ResolveOptions,
) -> ResolvedMessage {
    let filtered = MessageFilter::new().filter(raw);
    let is_merge_request = filtered.is_merge_request;

    if !options.include_all && !is_merge_request {
        return ResolvedMessage {
            hash,
            text: String::new(),
            is_merge_request,
        };
    }

    let text = filtered.into_text(options.short);
    let text = if text.is_empty() {
        text
    } else {
        sanitizer.sanitize(&text)
    };

    ResolvedMessage {
        hash,
        text,
        is_merge_request,
    }
}
