use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all possible errors that can occur while loading timing data
#[derive(Debug)]
pub enum TimingError {
    Source(SourceError),
    Parse(ParseError),
    Config(ConfigError),
    UnsupportedReciter(String),
    Other(io::Error),
}

/// Fetch failures (transport errors, non-success HTTP status, unreadable file)
#[derive(Debug)]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Malformed timing documents
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::Other(err) => write!(f, "I/O error: {}", err),
            TimingError::Source(err) => write!(f, "Source error: {}", err),
            TimingError::Parse(err) => write!(f, "Parse error: {}", err),
            TimingError::Config(err) => write!(f, "Config error: {}", err),
            TimingError::UnsupportedReciter(id) => {
                write!(f, "No timing data available for reciter: {}", id)
            }
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for TimingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TimingError::Other(err) => Some(err),
            _ => None,
        }
    }
}
impl Error for SourceError {}
impl Error for ParseError {}
impl Error for ConfigError {}

// Conversion implementations
impl From<io::Error> for TimingError {
    fn from(err: io::Error) -> Self {
        TimingError::Other(err)
    }
}

impl From<SourceError> for TimingError {
    fn from(err: SourceError) -> Self {
        TimingError::Source(err)
    }
}

impl From<ParseError> for TimingError {
    fn from(err: ParseError) -> Self {
        TimingError::Parse(err)
    }
}

impl From<ConfigError> for TimingError {
    fn from(err: ConfigError) -> Self {
        TimingError::Config(err)
    }
}

impl From<serde_json::Error> for TimingError {
    fn from(err: serde_json::Error) -> Self {
        TimingError::Parse(ParseError::new(err.to_string()))
    }
}

// Type alias for Result with TimingError
pub type TimingResult<T> = Result<T, TimingError>;
