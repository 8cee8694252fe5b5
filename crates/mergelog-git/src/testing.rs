//! In-memory provider for exercising the driver and resolver without git

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use mergelog_core::error::HistoryError;
use mergelog_core::record::CommitRecord;

use crate::provider::{HistoryProvider, RecordStream, Result};

/// Scripted history provider
pub(crate) struct FakeProvider {
    records: Vec<CommitRecord>,
    messages: HashMap<String, String>,
    fail_after_stream: bool,
    fetch_delay: Option<Duration>,
    aborted: Arc<AtomicBool>,
    served: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub(crate) fn new(records: Vec<CommitRecord>) -> Self {
        Self {
            records,
            messages: HashMap::new(),
            fail_after_stream: false,
            fetch_delay: None,
            aborted: Arc::new(AtomicBool::new(false)),
            served: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Script a raw message body for a hash
    pub(crate) fn with_message(mut self, hash: &str, body: &str) -> Self {
        self.messages.insert(hash.to_string(), body.to_string());
        self
    }

    /// Make the stream end with a provider failure instead of clean EOF
    pub(crate) fn failing_after_stream(mut self) -> Self {
        self.fail_after_stream = true;
        self
    }

    /// Hold every message fetch open for `delay`, recording peak concurrency
    pub(crate) fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub(crate) fn was_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    pub(crate) fn max_in_flight_fetches(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn records_served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HistoryProvider for FakeProvider {
    async fn open_history(&self, _branch: Option<&str>) -> Result<Box<dyn RecordStream>> {
        Ok(Box::new(FakeStream {
            remaining: self.records.iter().cloned().collect(),
            fail_after_stream: self.fail_after_stream,
            aborted: self.aborted.clone(),
            served: self.served.clone(),
        }))
    }

    async fn commit_message(&self, hash: &str) -> Result<String> {
        if let Some(delay) = self.fetch_delay {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(delay).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
        }

        self.messages
            .get(hash)
            .cloned()
            .ok_or_else(|| HistoryError::MessageFetchFailed {
                hash: hash.to_string(),
                reason: "no such commit".to_string(),
            })
    }
}

struct FakeStream {
    remaining: VecDeque<CommitRecord>,
    fail_after_stream: bool,
    aborted: Arc<AtomicBool>,
    served: Arc<AtomicUsize>,
}

#[async_trait]
impl RecordStream for FakeStream {
    async fn next_record(&mut self) -> Result<Option<CommitRecord>> {
        match self.remaining.pop_front() {
            Some(record) => {
                self.served.fetch_add(1, Ordering::SeqCst);
                Ok(Some(record))
            }
            None if self.fail_after_stream => Err(HistoryError::ProviderExited {
                status: 128,
                stderr: "fatal: scripted failure".to_string(),
            }),
            None => Ok(None),
        }
    }

    async fn abort(&mut self) -> Result<()> {
        self.aborted.store(true, Ordering::SeqCst);
        self.remaining.clear();
        Ok(())
    }
}
