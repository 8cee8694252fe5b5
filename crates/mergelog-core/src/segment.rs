//! Version segmentation state machine
//!
//! Walks a newest-first commit stream and groups commit hashes under the
//! version tag active when each commit is reached. Implemented as an explicit
//! fold: each record pushed in yields a step telling the driver whether a
//! bucket was sealed and whether to keep consuming the stream.

use tracing::debug;

use crate::record::{CommitRecord, VersionBucket};
use crate::version::Version;

/// Outcome of feeding one record to the segmenter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentStep {
    /// Keep consuming records
    Continue,
    /// A bucket was sealed by a new version tag; keep consuming
    Sealed(VersionBucket),
    /// The stop version was reached; the bucket still open above it is
    /// sealed and carried here. Abandon the stream.
    Stop(Option<VersionBucket>),
}

/// Incremental segmenter over a newest-first commit stream
///
/// Exactly one bucket is open at a time. A new version tag seals the open
/// bucket before a fresh one is opened for the tagged commit, so the tagged
/// commit itself belongs to the version it introduces. Commits seen before
/// any tag (unreleased work above the newest release) belong to no bucket.
#[derive(Debug)]
pub struct Segmenter {
    include_all: bool,
    until: Option<Version>,
    current: Option<VersionBucket>,
    stopped: bool,
}

impl Segmenter {
    /// Create a segmenter
    ///
    /// With `include_all` off, only merge commits (parent count > 1) are
    /// retained inside a bucket. When a tag equal to `until` is reached the
    /// open bucket is sealed one last time and the stream is stopped; no
    /// bucket is ever opened for `until` itself.
    pub fn new(include_all: bool, until: Option<Version>) -> Self {
        Self {
            include_all,
            until,
            current: None,
            stopped: false,
        }
    }

    /// Feed the next (newer-to-older) commit record
    pub fn push(&mut self, record: &CommitRecord) -> SegmentStep {
        if self.stopped {
            return SegmentStep::Stop(None);
        }

        if let Some(tag) = record.version_tag() {
            if self.until.as_ref() == Some(&tag) {
                debug!(version = %tag, hash = %record.hash, "reached known version, stopping");
                self.stopped = true;
                return SegmentStep::Stop(self.current.take());
            }

            let sealed = self.current.take();
            debug!(version = %tag, hash = %record.hash, "opening bucket");
            self.current = Some(VersionBucket::new(tag));
            self.retain(record);

            return match sealed {
                Some(bucket) => SegmentStep::Sealed(bucket),
                None => SegmentStep::Continue,
            };
        }

        self.retain(record);
        SegmentStep::Continue
    }

    /// Seal whatever is still open once the stream is exhausted
    pub fn finish(mut self) -> Option<VersionBucket> {
        if self.stopped {
            return None;
        }
        self.current.take()
    }

    fn retain(&mut self, record: &CommitRecord) {
        if !self.include_all && !record.is_merge() {
            return;
        }
        if let Some(bucket) = self.current.as_mut() {
            bucket.commits.push(record.hash.clone());
        }
    }
}

/// Run the segmenter over an in-memory record slice
///
/// Streaming callers drive [`Segmenter`] directly so they can cancel the
/// underlying source; this helper exists for already-collected histories
/// and for tests.
pub fn segment_records(
    records: &[CommitRecord],
    include_all: bool,
    until: Option<Version>,
) -> Vec<VersionBucket> {
    let mut segmenter = Segmenter::new(include_all, until);
    let mut buckets = Vec::new();

    for record in records {
        match segmenter.push(record) {
            SegmentStep::Continue => {}
            SegmentStep::Sealed(bucket) => buckets.push(bucket),
            SegmentStep::Stop(sealed) => {
                buckets.extend(sealed);
                return buckets;
            }
        }
    }

    if let Some(bucket) = segmenter.finish() {
        buckets.push(bucket);
    }

    buckets
}
