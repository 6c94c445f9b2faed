use crate::config::TimingConfig;
use crate::errors::{TimingError, TimingResult};
use crate::source::{HttpTimingSource, LocalTimingSource, SourceStats, TimingSource};
use crate::timing::{Segment, VerseIndex};
use log::{error, info};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::OnceCell;

type IndexCell = Arc<OnceCell<Arc<VerseIndex>>>;

/// Per-reciter cache of verse timing indexes.
///
/// An index is published only once its document has been fetched and parsed
/// completely; a failed load leaves nothing behind and may be retried.
/// Concurrent loads of the same reciter share a single fetch.
pub struct TimingStore<S = Box<dyn TimingSource>> {
    config: TimingConfig,
    source: S,
    indexes: RwLock<HashMap<String, IndexCell>>,
}

impl TimingStore<Box<dyn TimingSource>> {
    /// Build a store whose source is picked from `config.base_location`:
    /// HTTP for `http://`/`https://` prefixes, a local directory otherwise.
    pub fn from_config(config: TimingConfig) -> TimingResult<Self> {
        let source: Box<dyn TimingSource> = if config.is_remote() {
            Box::new(HttpTimingSource::with_timeout(
                config.base_location.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )?)
        } else {
            Box::new(LocalTimingSource::new(&config.base_location))
        };
        Ok(Self::new(config, source))
    }
}

impl<S: TimingSource> TimingStore<S> {
    pub fn new(config: TimingConfig, source: S) -> Self {
        Self {
            config,
            source,
            indexes: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Whether the reciter has word timing at all. No I/O.
    pub fn has_timing_data(&self, reciter_id: &str) -> bool {
        self.config.reciters.contains(reciter_id)
    }

    /// Ids of every reciter with word timing, sorted
    pub fn reciters_with_timing(&self) -> Vec<String> {
        self.config.reciters.reciter_ids()
    }

    /// Load and index the reciter's timing data.
    ///
    /// Returns `true` once the index is available. Failures are logged and
    /// reported as `false`; they never propagate.
    pub async fn load_timing_data(&self, reciter_id: &str) -> bool {
        match self.try_load_timing_data(reciter_id).await {
            Ok(_) => true,
            Err(TimingError::UnsupportedReciter(_)) => {
                info!("No timing data available for reciter: {}", reciter_id);
                false
            }
            Err(e) => {
                error!("Error loading timing data for {}: {}", reciter_id, e);
                false
            }
        }
    }

    /// Same as [`load_timing_data`](Self::load_timing_data) with the failure cause kept
    pub async fn try_load_timing_data(&self, reciter_id: &str) -> TimingResult<Arc<VerseIndex>> {
        let location = self
            .config
            .location_for(reciter_id)
            .ok_or_else(|| TimingError::UnsupportedReciter(reciter_id.to_string()))?;

        let cell = self.cell(reciter_id);
        let index = cell
            .get_or_try_init(|| self.fetch_index(reciter_id, &location))
            .await?;

        Ok(Arc::clone(index))
    }

    pub fn is_timing_data_loaded(&self, reciter_id: &str) -> bool {
        self.index(reciter_id).is_some()
    }

    /// The loaded index of a reciter, if any
    pub fn index(&self, reciter_id: &str) -> Option<Arc<VerseIndex>> {
        let indexes = self.indexes.read().unwrap_or_else(PoisonError::into_inner);
        indexes.get(reciter_id).and_then(|cell| cell.get().cloned())
    }

    /// Segments of one verse, or `None` when the reciter is not loaded or
    /// the verse is not covered by its dataset
    pub fn get_verse_timings(
        &self,
        reciter_id: &str,
        surah: u16,
        ayah: u16,
    ) -> Option<Arc<[Segment]>> {
        self.index(reciter_id)?.get_verse(surah, ayah)
    }

    pub fn source_stats(&self) -> SourceStats {
        self.source.stats()
    }

    fn cell(&self, reciter_id: &str) -> IndexCell {
        if let Some(cell) = self
            .indexes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(reciter_id)
        {
            return Arc::clone(cell);
        }

        let mut indexes = self.indexes.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(indexes.entry(reciter_id.to_string()).or_default())
    }

    async fn fetch_index(&self, reciter_id: &str, location: &str) -> TimingResult<Arc<VerseIndex>> {
        let bytes = self.source.fetch(location).await?;
        let index = VerseIndex::from_slice(&bytes)?;
        info!(
            "Loaded timing data for {}: {} entries",
            reciter_id,
            index.len()
        );
        Ok(Arc::new(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ReciterTable, ReciterTiming};
    use crate::errors::SourceError;
    use crate::source::MockTimingSource;

    const DOC: &[u8] = br#"[
        {"surah": 1, "ayah": 1, "segments": [[0, 0, 0, 300], [1, 1, 300, 650], [2, 2, 650, 900]]},
        {"surah": 112, "ayah": 1, "segments": [[0, 0, 40, 410], [1, 1, 410, 800]]}
    ]"#;

    fn config() -> TimingConfig {
        TimingConfig {
            reciters: ReciterTable::new().with("ar.alafasy", ReciterTiming::new("Alafasy", 128)),
            ..TimingConfig::default()
        }
    }

    #[tokio::test]
    async fn load_is_idempotent() {
        let mut source = MockTimingSource::new();
        source
            .expect_fetch()
            .with(mockall::predicate::eq("Alafasy_128kbps.json"))
            .times(1)
            .returning(|_| Ok(DOC.to_vec()));

        let store = TimingStore::new(config(), source);
        assert!(store.load_timing_data("ar.alafasy").await);
        let first = store.index("ar.alafasy").unwrap();
        assert!(store.load_timing_data("ar.alafasy").await);
        let second = store.index("ar.alafasy").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn lookup_before_load_is_none() {
        let store = TimingStore::new(config(), MockTimingSource::new());
        assert!(store.has_timing_data("ar.alafasy"));
        assert!(!store.is_timing_data_loaded("ar.alafasy"));
        assert!(store.get_verse_timings("ar.alafasy", 1, 1).is_none());
    }

    #[tokio::test]
    async fn unsupported_reciter_never_fetches() {
        let mut source = MockTimingSource::new();
        source.expect_fetch().times(0);

        let store = TimingStore::new(config(), source);
        assert!(!store.has_timing_data("ar.dosarywarsh"));
        assert!(!store.load_timing_data("ar.dosarywarsh").await);
        assert!(matches!(
            store.try_load_timing_data("ar.dosarywarsh").await,
            Err(TimingError::UnsupportedReciter(_))
        ));
    }

    #[tokio::test]
    async fn failed_load_leaves_no_index_and_retries() {
        let mut source = MockTimingSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(SourceError::new("Failed to fetch timing data: 503").into()));
        source
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(b"[{\"surah\": 1".to_vec()));
        source
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(DOC.to_vec()));

        let store = TimingStore::new(config(), source);

        assert!(!store.load_timing_data("ar.alafasy").await);
        assert!(!store.is_timing_data_loaded("ar.alafasy"));

        assert!(matches!(
            store.try_load_timing_data("ar.alafasy").await,
            Err(TimingError::Parse(_))
        ));
        assert!(store.get_verse_timings("ar.alafasy", 1, 1).is_none());

        assert!(store.load_timing_data("ar.alafasy").await);
        assert!(store.is_timing_data_loaded("ar.alafasy"));
    }

    #[tokio::test]
    async fn verse_lookup_after_load() {
        let mut source = MockTimingSource::new();
        source.expect_fetch().returning(|_| Ok(DOC.to_vec()));

        let store = TimingStore::new(config(), source);
        assert!(store.load_timing_data("ar.alafasy").await);

        let segments = store.get_verse_timings("ar.alafasy", 112, 1).unwrap();
        assert_eq!(segments[0], Segment::new(0, 0, 40, 410));
        assert!(store.get_verse_timings("ar.alafasy", 2, 255).is_none());
        assert!(store.get_verse_timings("ar.husary", 1, 1).is_none());
    }

    #[tokio::test]
    async fn invalid_address_does_not_fail_the_load() {
        let mut source = MockTimingSource::new();
        source.expect_fetch().times(1).returning(|_| {
            Ok(br#"[
                {"surah": 1, "ayah": 1, "segments": [[0, 0, 0, 300]]},
                {"surah": 1, "ayah": 0, "segments": [[0, 0, 0, 300]]}
            ]"#
            .to_vec())
        });

        let store = TimingStore::new(config(), source);
        assert_eq!(
            store.config().location_for("ar.alafasy").as_deref(),
            Some("Alafasy_128kbps.json")
        );
        assert!(store.load_timing_data("ar.alafasy").await);
        assert!(store.get_verse_timings("ar.alafasy", 1, 1).is_some());
        assert_eq!(store.index("ar.alafasy").unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_loads_share_one_fetch() {
        let mut source = MockTimingSource::new();
        source.expect_fetch().times(1).returning(|_| {
            std::thread::sleep(std::time::Duration::from_millis(20));
            Ok(DOC.to_vec())
        });

        let store = Arc::new(TimingStore::new(config(), source));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.load_timing_data("ar.alafasy").await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert!(store.is_timing_data_loaded("ar.alafasy"));
    }

    #[test]
    fn reciters_with_timing_lists_table() {
        let store = TimingStore::new(TimingConfig::default(), MockTimingSource::new());
        let ids = store.reciters_with_timing();
        assert_eq!(ids.len(), 12);
        assert!(ids.contains(&"ar.alafasy".to_string()));
        assert!(!ids.contains(&"ar.dosarywarsh".to_string()));
    }
}
