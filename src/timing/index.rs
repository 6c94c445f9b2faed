use super::resolver::find_ordering_violation;
use super::types::{Segment, TimingEntry, VerseKey};
use crate::errors::{ParseError, TimingResult};
use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Parse a reciter's timing document (a JSON array of [`TimingEntry`])
pub fn parse_timing_document(bytes: &[u8]) -> TimingResult<Vec<TimingEntry>> {
    let entries: Vec<TimingEntry> = serde_json::from_slice(bytes)
        .map_err(|e| ParseError::new(format!("invalid timing document: {}", e)))?;
    Ok(entries)
}

/// Immutable `surah:ayah -> segments` index for one reciter
#[derive(Debug, Default)]
pub struct VerseIndex {
    verses: HashMap<VerseKey, Arc<[Segment]>>,
}

impl VerseIndex {
    /// Build the index from parsed entries.
    ///
    /// Entry order is not significant; a repeated key keeps the later entry.
    /// Entries with an invalid address are skipped.
    pub fn from_entries(entries: Vec<TimingEntry>) -> Self {
        let mut verses = HashMap::with_capacity(entries.len());

        for entry in entries {
            let key = match entry.key() {
                Ok(key) => key,
                Err(e) => {
                    warn!(
                        "Skipping timing entry with invalid address {}:{}: {}",
                        entry.surah, entry.ayah, e
                    );
                    continue;
                }
            };

            if let Some(violation) = find_ordering_violation(&entry.segments) {
                warn!("Timing segments for {} are not ordered: {}", key, violation);
            }

            if verses.insert(key, Arc::from(entry.segments)).is_some() {
                debug!("Duplicate timing entry for {}, keeping the later one", key);
            }
        }

        Self { verses }
    }

    /// Parse and index a raw document in one step
    pub fn from_slice(bytes: &[u8]) -> TimingResult<Self> {
        Ok(Self::from_entries(parse_timing_document(bytes)?))
    }

    pub fn get(&self, key: VerseKey) -> Option<Arc<[Segment]>> {
        self.verses.get(&key).cloned()
    }

    /// Lookup by raw numbers; out-of-range addresses are simply absent
    pub fn get_verse(&self, surah: u16, ayah: u16) -> Option<Arc<[Segment]>> {
        VerseKey::new(surah, ayah).ok().and_then(|key| self.get(key))
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Surahs with at least one timed verse, ascending
    pub fn surahs(&self) -> Vec<u16> {
        self.verses
            .keys()
            .map(VerseKey::surah)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Total number of segments across all verses
    pub fn segment_count(&self) -> usize {
        self.verses.values().map(|s| s.len()).sum()
    }
}
