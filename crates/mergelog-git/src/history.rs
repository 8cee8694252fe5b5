//! Segmentation driver over a record stream

use tracing::{debug, instrument};

use mergelog_core::segment::{SegmentStep, Segmenter};
use mergelog_core::version::Version;
use mergelog_core::VersionBucket;

use crate::provider::{HistoryProvider, Result};

/// Read a branch's history and group its commits into version buckets.
///
/// The stream is consumed newest-first and aborted as soon as the segmenter
/// reports the `until` version, so resuming from a recent release never reads
/// the whole history.
#[instrument(skip(provider), fields(until = until.as_ref().map(|v| v.as_str())))]
pub async fn collect_buckets<P>(
    provider: &P,
    branch: Option<&str>,
    include_all: bool,
    until: Option<Version>,
) -> Result<Vec<VersionBucket>>
where
    P: HistoryProvider + ?Sized,
{
    let mut stream = provider.open_history(branch).await?;
    let mut segmenter = Segmenter::new(include_all, until);
    let mut buckets = Vec::new();

    while let Some(record) = stream.next_record().await? {
        match segmenter.push(&record) {
            SegmentStep::Continue => {}
            SegmentStep::Sealed(bucket) => buckets.push(bucket),
            SegmentStep::Stop(sealed) => {
                buckets.extend(sealed);
                stream.abort().await?;
                debug!(buckets = buckets.len(), "history aborted at known version");
                return Ok(buckets);
            }
        }
    }

    if let Some(bucket) = segmenter.finish() {
        buckets.push(bucket);
    }

    debug!(buckets = buckets.len(), "history exhausted");
    Ok(buckets)
}
