//! File analysis and directory scanning.
//!
//! [`analyze_file`] turns one TCX file into per-zone average speeds and
//! folds them into a [`ZoneMaxima`]. [`scan_directory`] runs it over every
//! regular file of a directory and writes the report.

pub mod report;

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::activity::{
    collect_samples, locate_activity, ActivityError, Document, DocumentError, XmlNode,
};
use crate::metrics::{classify_samples, zone_speeds, ZoneError, ZoneMaxima, ZoneStats};
use crate::storage::config::AnalyzerConfig;

/// Errors raised while analyzing files.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Activity error: {0}")]
    Activity(#[from] ActivityError),

    #[error("Zone error: {0}")]
    Zone(#[from] ZoneError),

    #[error("Cannot read directory {path:?}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write report")]
    Output(#[source] std::io::Error),
}

/// Why a file was not analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No `TrainingCenterDatabase/Activities/Activity` node
    NoActivity,
    /// Activity sport differs from the configured one
    OtherSport(String),
}

/// Result of analyzing one qualifying file.
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub file_name: String,
    pub sample_count: usize,
    pub zone_stats: Vec<ZoneStats>,
    /// Average speed per zone in km/h, `None` where the zone had no samples
    pub zone_speeds: Vec<Option<f64>>,
}

/// Outcome of [`analyze_file`].
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Analyzed(FileAnalysis),
    Skipped(SkipReason),
}

/// Totals of a directory scan.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub analyzed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub maxima: ZoneMaxima,
}

/// Analyze a single activity file and fold its zone speeds into `maxima`.
///
/// `maxima` is only modified when the whole file was analyzed successfully.
pub fn analyze_file(
    path: &Path,
    config: &AnalyzerConfig,
    maxima: &mut ZoneMaxima,
) -> Result<FileOutcome, AnalysisError> {
    let document = Document::open(path)?;

    let Some(activity) = locate_activity(document.root()) else {
        tracing::debug!("No activity in {:?}", path);
        return Ok(FileOutcome::Skipped(SkipReason::NoActivity));
    };

    let sport = activity.attribute("Sport").unwrap_or_default();
    if sport != config.sport {
        tracing::debug!("Skipping {:?}: sport is {:?}", path, sport);
        return Ok(FileOutcome::Skipped(SkipReason::OtherSport(sport.to_string())));
    }

    let samples = collect_samples(activity)?;
    let zone_stats = classify_samples(&samples, &config.zones);
    let speeds = zone_speeds(&zone_stats);
    maxima.fold(&speeds)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    tracing::info!(
        "{}: {} samples, zone speeds {}",
        file_name,
        samples.len(),
        report::format_speeds(&speeds)
    );

    Ok(FileOutcome::Analyzed(FileAnalysis {
        file_name,
        sample_count: samples.len(),
        zone_stats,
        zone_speeds: speeds,
    }))
}

/// Analyze every regular file in `dir` and write the report to `out`.
///
/// Files that fail to parse are logged and skipped. Only failing to read
/// the directory itself, or to write the report, is an error.
pub fn scan_directory<W: Write>(
    dir: &Path,
    config: &AnalyzerConfig,
    out: &mut W,
) -> Result<ScanSummary, AnalysisError> {
    let entries = std::fs::read_dir(dir).map_err(|source| AnalysisError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut summary = ScanSummary {
        analyzed: 0,
        skipped: 0,
        failed: 0,
        maxima: ZoneMaxima::new(config.zones.len()),
    };

    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(e) => {
                tracing::warn!("Failed to read entry in {:?}: {}", dir, e);
                summary.failed += 1;
                continue;
            }
        };

        // metadata() follows symlinks
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Failed to stat {:?}: {}", path, e);
                summary.failed += 1;
                continue;
            }
        }

        match analyze_file(&path, config, &mut summary.maxima) {
            Ok(FileOutcome::Analyzed(analysis)) => {
                summary.analyzed += 1;
                write!(out, "{} ", analysis.file_name).map_err(AnalysisError::Output)?;
            }
            Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", path, e);
                summary.failed += 1;
            }
        }
    }

    writeln!(out).map_err(AnalysisError::Output)?;
    writeln!(out, "{}", report::format_maxima(&summary.maxima)).map_err(AnalysisError::Output)?;

    tracing::info!(
        "Scanned {:?}: {} analyzed, {} skipped, {} failed",
        dir,
        summary.analyzed,
        summary.skipped,
        summary.failed
    );

    Ok(summary)
}
