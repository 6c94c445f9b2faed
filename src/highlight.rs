use crate::timing::{current_word_index, Segment, VerseKey};
use serde::Serialize;

/// The word currently highlighted in the rendered text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightedWord {
    pub surah: u16,
    pub ayah: u16,
    pub word_index: u32,
}

/// Follows playback of one verse at a time and keeps the highlighted word.
///
/// Fed from the player's time-update notifications. A tick that resolves to
/// no word leaves the previous highlight in place.
#[derive(Debug, Clone)]
pub struct WordHighlighter {
    enabled: bool,
    current: Option<HighlightedWord>,
}

impl Default for WordHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl WordHighlighter {
    pub fn new() -> Self {
        Self {
            enabled: true,
            current: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turning highlighting off also clears the current word
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<HighlightedWord> {
        self.current
    }

    /// Reset on playback stop or verse change
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Handle a time update at `position_secs` into the verse's audio.
    ///
    /// Returns `true` when the highlighted word changed.
    pub fn on_time_update(
        &mut self,
        segments: &[Segment],
        verse: VerseKey,
        position_secs: f64,
    ) -> bool {
        if !self.enabled {
            return false;
        }

        let Some(word_index) = current_word_index(segments, position_secs * 1000.0) else {
            return false;
        };

        let next = HighlightedWord {
            surah: verse.surah(),
            ayah: verse.ayah(),
            word_index,
        };
        if self.current == Some(next) {
            return false;
        }

        self.current = Some(next);
        true
    }
}
