pub mod timing;
pub use timing::{
    current_word_index, current_word_range, parse_timing_document, Segment, TimingEntry,
    VerseIndex, VerseKey, WordRange,
};

pub mod source;
pub use source::{HttpTimingSource, LocalTimingSource, SourceStats, TimingSource};

pub mod config;
pub use config::{
    find_reciter, FileNaming, ReciterProfile, ReciterTable, ReciterTiming, TimingConfig,
    KNOWN_RECITERS,
};

pub mod store;
pub use store::TimingStore;

pub mod highlight;
pub use highlight::{HighlightedWord, WordHighlighter};

pub mod errors;
pub use errors::{ConfigError, ParseError, SourceError, TimingError, TimingResult};
