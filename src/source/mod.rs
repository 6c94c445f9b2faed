pub mod http_timing_source;
pub mod timing_source;

pub use http_timing_source::HttpTimingSource;
pub use timing_source::{LocalTimingSource, SourceStats, TimingSource};

#[cfg(test)]
pub use timing_source::MockTimingSource;
