use crate::errors::{ConfigError, TimingResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Where a reciter's timing file lives, relative to [`TimingConfig::base_location`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReciterTiming {
    pub file_stem: String,
    #[serde(default)]
    pub bitrate_kbps: Option<u32>,
}

impl ReciterTiming {
    pub fn new(file_stem: impl Into<String>, bitrate_kbps: u32) -> Self {
        Self {
            file_stem: file_stem.into(),
            bitrate_kbps: Some(bitrate_kbps),
        }
    }
}

/// How timing file names are derived from a [`ReciterTiming`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
    /// `Alafasy_128kbps.json`
    #[default]
    WithBitrate,
    /// `Alafasy.json`
    Plain,
}

impl FileNaming {
    pub fn file_name(&self, timing: &ReciterTiming) -> String {
        match (self, timing.bitrate_kbps) {
            (FileNaming::WithBitrate, Some(kbps)) => {
                format!("{}_{}kbps.json", timing.file_stem, kbps)
            }
            _ => format!("{}.json", timing.file_stem),
        }
    }
}

/// Fixed mapping from reciter id to timing file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReciterTable(BTreeMap<String, ReciterTiming>);

impl ReciterTable {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// The reciters covered by the quran-align dataset
    pub fn quran_align() -> Self {
        [
            ("ar.alafasy", "Alafasy", 128),
            ("ar.abdulbasitmujawwad", "Abdul_Basit_Mujawwad", 128),
            ("ar.abdulbasitmurattal", "Abdul_Basit_Murattal", 64),
            ("ar.sudais", "Abdurrahmaan_As-Sudais", 192),
            ("ar.shaatree", "Abu_Bakr_Ash-Shaatree", 128),
            ("ar.hanirifai", "Hani_Rifai", 192),
            ("ar.husary", "Husary", 64),
            ("ar.husarymuallim", "Husary_Muallim", 128),
            ("ar.minshawimujawwad", "Minshawy_Mujawwad", 192),
            ("ar.minshawimurttal", "Minshawy_Murattal", 128),
            ("ar.tablaway", "Mohammad_al_Tablaway", 128),
            ("ar.shuraym", "Saood_ash-Shuraym", 128),
        ]
        .into_iter()
        .fold(Self::new(), |table, (id, stem, kbps)| {
            table.with(id, ReciterTiming::new(stem, kbps))
        })
    }

    pub fn with(mut self, reciter_id: impl Into<String>, timing: ReciterTiming) -> Self {
        self.0.insert(reciter_id.into(), timing);
        self
    }

    pub fn get(&self, reciter_id: &str) -> Option<&ReciterTiming> {
        self.0.get(reciter_id)
    }

    pub fn contains(&self, reciter_id: &str) -> bool {
        self.0.contains_key(reciter_id)
    }

    /// Reciter ids, sorted
    pub fn reciter_ids(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ReciterTable {
    fn default() -> Self {
        Self::quran_align()
    }
}

/// Timing store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// URL prefix (`http://`, `https://`) or local directory holding the timing files
    pub base_location: String,
    pub naming: FileNaming,
    pub reciters: ReciterTable,
    pub request_timeout_secs: u64,
}

impl TimingConfig {
    pub const DEFAULT_BASE_LOCATION: &'static str = "timing-data";
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn new(base_location: impl Into<String>) -> Self {
        Self {
            base_location: base_location.into(),
            ..Self::default()
        }
    }

    /// Read a JSON configuration file; missing fields take their defaults
    pub fn load(path: &Path) -> TimingResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&data).map_err(|e| {
            ConfigError::new(format!("failed to parse {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    pub fn is_remote(&self) -> bool {
        self.base_location.starts_with("http://") || self.base_location.starts_with("https://")
    }

    /// File name of the reciter's timing document, if the reciter is supported
    pub fn location_for(&self, reciter_id: &str) -> Option<String> {
        self.reciters
            .get(reciter_id)
            .map(|timing| self.naming.file_name(timing))
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            base_location: Self::DEFAULT_BASE_LOCATION.to_string(),
            naming: FileNaming::default(),
            reciters: ReciterTable::default(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// A reciter offered for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReciterProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub style: Option<&'static str>,
}

impl ReciterProfile {
    pub const fn new(id: &'static str, name: &'static str, style: Option<&'static str>) -> Self {
        Self { id, name, style }
    }
}

/// Reciter catalog. Being listed here does not imply word timing is available.
pub const KNOWN_RECITERS: &[ReciterProfile] = &[
    ReciterProfile::new("ar.alafasy", "Mishary Al-Afasy", None),
    ReciterProfile::new("ar.abdulbasitmujawwad", "Abdul Basit", Some("Mujawwad")),
    ReciterProfile::new("ar.abdulbasitmurattal", "Abdul Basit", Some("Murattal")),
    ReciterProfile::new("ar.sudais", "Abdurrahmaan As-Sudais", None),
    ReciterProfile::new("ar.shaatree", "Abu Bakr Ash-Shaatree", None),
    ReciterProfile::new("ar.hanirifai", "Hani Ar-Rifai", None),
    ReciterProfile::new("ar.husary", "Al-Husary", Some("Murattal")),
    ReciterProfile::new("ar.husarymuallim", "Al-Husary", Some("Muallim")),
    ReciterProfile::new("ar.minshawimujawwad", "Al-Minshawi", Some("Mujawwad")),
    ReciterProfile::new("ar.minshawimurttal", "Al-Minshawi", Some("Murattal")),
    ReciterProfile::new("ar.tablaway", "Mohammad Al-Tablaway", None),
    ReciterProfile::new("ar.shuraym", "Saood Ash-Shuraym", None),
    ReciterProfile::new("ar.dosarywarsh", "Ibrahim Al-Dosary", Some("Warsh")),
];

pub fn find_reciter(reciter_id: &str) -> Option<&'static ReciterProfile> {
    KNOWN_RECITERS.iter().find(|r| r.id == reciter_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_uses_bitrate_file_names() {
        let config = TimingConfig::default();
        assert_eq!(config.reciters.len(), 12);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(!config.is_remote());
        assert_eq!(
            config.location_for("ar.alafasy").as_deref(),
            Some("Alafasy_128kbps.json")
        );
        assert_eq!(
            config.location_for("ar.abdulbasitmurattal").as_deref(),
            Some("Abdul_Basit_Murattal_64kbps.json")
        );
        assert_eq!(config.location_for("ar.dosarywarsh"), None);
    }

    #[test]
    fn plain_naming_drops_bitrate() {
        let config = TimingConfig {
            naming: FileNaming::Plain,
            ..TimingConfig::default()
        };
        assert_eq!(
            config.location_for("ar.shuraym").as_deref(),
            Some("Saood_ash-Shuraym.json")
        );

        let no_bitrate = ReciterTiming {
            file_stem: "Custom".to_string(),
            bitrate_kbps: None,
        };
        assert_eq!(FileNaming::WithBitrate.file_name(&no_bitrate), "Custom.json");
    }

    #[test]
    fn warsh_reciter_is_cataloged_without_timing() {
        let warsh = find_reciter("ar.dosarywarsh").unwrap();
        assert_eq!(warsh.style, Some("Warsh"));
        assert!(!ReciterTable::quran_align().contains(warsh.id));

        let timed = KNOWN_RECITERS
            .iter()
            .filter(|r| ReciterTable::quran_align().contains(r.id))
            .count();
        assert_eq!(timed, 12);
    }

    #[test]
    fn load_partial_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "base_location": "https://cdn.example.org/quran-timing-data",
                "naming": "plain",
                "reciters": {{ "ar.alafasy": {{ "file_stem": "Alafasy" }} }}
            }}"#
        )
        .unwrap();

        let config = TimingConfig::load(file.path()).unwrap();
        assert!(config.is_remote());
        assert_eq!(config.reciters.reciter_ids(), vec!["ar.alafasy".to_string()]);
        assert_eq!(config.location_for("ar.alafasy").as_deref(), Some("Alafasy.json"));
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn load_rejects_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "naming": "shouting" }}"#).unwrap();
        assert!(matches!(
            TimingConfig::load(file.path()),
            Err(crate::TimingError::Config(_))
        ));

        let missing = TimingConfig::load(Path::new("/nonexistent/wordtiming.json"));
        assert!(matches!(missing, Err(crate::TimingError::Config(_))));
    }
}
