use crate::errors::{SourceError, TimingResult};
use async_trait::async_trait;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Fetch counters of a [`TimingSource`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub request_count: u64,
    pub bytes_read: u64,
}

impl SourceStats {
    /// Log the counters at info level
    pub fn log(&self) {
        info!("📊 Timing Download Statistics:");
        info!("   🔢 Requests: {}", self.request_count);
        info!(
            "   📥 Total Downloaded: {} bytes ({:.2} KB)",
            self.bytes_read,
            self.bytes_read as f64 / 1024.0
        );
    }
}

/// Shared request/byte counters for source implementations
#[derive(Debug, Default)]
pub(crate) struct StatsCounter {
    request_count: AtomicU64,
    bytes_read: AtomicU64,
}

impl StatsCounter {
    pub(crate) fn record_request(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_bytes(&self, bytes: usize) {
        self.bytes_read.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> SourceStats {
        SourceStats {
            request_count: self.request_count.load(Ordering::Relaxed),
            bytes_read: self.bytes_read.load(Ordering::Relaxed),
        }
    }
}

/// Where raw timing documents come from, for both HTTP and local files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimingSource: Send + Sync {
    /// Fetch the whole document stored at `location` (a file name from the reciter table)
    async fn fetch(&self, location: &str) -> TimingResult<Vec<u8>>;

    fn stats(&self) -> SourceStats {
        SourceStats::default()
    }
}

#[async_trait]
impl<T: TimingSource + ?Sized> TimingSource for Box<T> {
    async fn fetch(&self, location: &str) -> TimingResult<Vec<u8>> {
        (**self).fetch(location).await
    }

    fn stats(&self) -> SourceStats {
        (**self).stats()
    }
}

/// Timing files in a local directory
#[derive(Debug)]
pub struct LocalTimingSource {
    root: PathBuf,
    stats: StatsCounter,
}

impl LocalTimingSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            stats: StatsCounter::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl TimingSource for LocalTimingSource {
    async fn fetch(&self, location: &str) -> TimingResult<Vec<u8>> {
        let path = self.root.join(location);
        debug!("Reading timing file {}", path.display());

        self.stats.record_request();
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            SourceError::new(format!("failed to read {}: {}", path.display(), e))
        })?;
        self.stats.record_bytes(bytes.len());

        Ok(bytes)
    }

    fn stats(&self) -> SourceStats {
        self.stats.snapshot()
    }
}
