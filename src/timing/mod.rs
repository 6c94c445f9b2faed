mod index;
mod resolver;
mod types;

pub use index::{parse_timing_document, VerseIndex};
pub use resolver::{current_word_index, current_word_range};
pub use types::{Segment, TimingEntry, VerseKey, WordRange, SURAH_COUNT};
