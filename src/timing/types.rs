use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of surahs in the mushaf
pub const SURAH_COUNT: u16 = 114;

/// Wire form of a segment: `[wordStart, wordEnd, startMs, endMs]`
type RawSegment = (u32, u32, u64, u64);

/// One timed span of a recited verse.
///
/// Millisecond interval is [start_ms, end_ms), i.e. start inclusive/end exclusive,
/// relative to the start of the verse's audio clip. Word bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSegment", into = "RawSegment")]
pub struct Segment {
    pub word_start: u32,
    pub word_end: u32,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl Segment {
    pub const fn new(word_start: u32, word_end: u32, start_ms: u64, end_ms: u64) -> Self {
        Self {
            word_start,
            word_end,
            start_ms,
            end_ms,
        }
    }

    /// Whether `time_ms` falls inside `[start_ms, end_ms)`
    pub fn contains(&self, time_ms: f64) -> bool {
        time_ms >= self.start_ms as f64 && time_ms < self.end_ms as f64
    }

    pub fn words(&self) -> WordRange {
        WordRange {
            start: self.word_start,
            end: self.word_end,
        }
    }
}

impl From<RawSegment> for Segment {
    fn from((word_start, word_end, start_ms, end_ms): RawSegment) -> Self {
        Segment::new(word_start, word_end, start_ms, end_ms)
    }
}

impl From<Segment> for RawSegment {
    fn from(segment: Segment) -> Self {
        (
            segment.word_start,
            segment.word_end,
            segment.start_ms,
            segment.end_ms,
        )
    }
}

/// Inclusive range of word indices spoken within one segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WordRange {
    pub start: u32,
    pub end: u32,
}

/// One verse of a reciter's timing document
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimingEntry {
    pub surah: u16,
    pub ayah: u16,
    pub segments: Vec<Segment>,
}

impl TimingEntry {
    pub fn key(&self) -> Result<VerseKey, ParseError> {
        VerseKey::new(self.surah, self.ayah)
    }
}

/// Address of a verse, written `surah:ayah`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerseKey {
    surah: u16,
    ayah: u16,
}

impl VerseKey {
    pub fn new(surah: u16, ayah: u16) -> Result<Self, ParseError> {
        if surah == 0 || surah > SURAH_COUNT {
            return Err(ParseError::new(format!(
                "surah {} out of range 1-{}",
                surah, SURAH_COUNT
            )));
        }
        if ayah == 0 {
            return Err(ParseError::new(format!(
                "ayah must be at least 1 (surah {})",
                surah
            )));
        }
        Ok(Self { surah, ayah })
    }

    pub fn surah(&self) -> u16 {
        self.surah
    }

    pub fn ayah(&self) -> u16 {
        self.ayah
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surah, self.ayah)
    }
}

impl FromStr for VerseKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (surah, ayah) = s
            .split_once(':')
            .ok_or_else(|| ParseError::new(format!("expected surah:ayah, got '{}'", s)))?;
        let surah = surah
            .trim()
            .parse::<u16>()
            .map_err(|e| ParseError::new(format!("invalid surah '{}': {}", surah, e)))?;
        let ayah = ayah
            .trim()
            .parse::<u16>()
            .map_err(|e| ParseError::new(format!("invalid ayah '{}': {}", ayah, e)))?;
        VerseKey::new(surah, ayah)
    }
}
