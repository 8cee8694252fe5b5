//! Mergelog Git - history access for changelog generation
//!
//! Wraps the `git` command line behind the [`HistoryProvider`] seam: a
//! cancellable newest-first stream of commit records plus per-commit message
//! lookup. The segmentation driver and the bounded-parallel message resolver
//! live here because they own the provider's lifecycle.

pub mod history;
pub mod provider;
pub mod resolver;

pub use history::collect_buckets;
pub use provider::{GitCliProvider, HistoryProvider, RecordStream, Result};
pub use resolver::{MessageResolver, ResolveOptions};

#[cfg(test)]
pub(crate) mod testing;
