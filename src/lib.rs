//! ZonePace - heart rate zone pace analysis for TCX activity files
//!
//! Reads a directory of TCX files, buckets each running activity's
//! trackpoints into heart rate zones, and reports the best average speed
//! reached in every zone across all activities.

pub mod activity;
pub mod analysis;
pub mod metrics;
pub mod storage;

// Re-export commonly used types
pub use activity::{Document, Sample};
pub use analysis::{analyze_file, scan_directory, FileOutcome, ScanSummary};
pub use metrics::{HeartRateZone, ZoneMaxima, DEFAULT_HR_ZONES};
pub use storage::config::AnalyzerConfig;
