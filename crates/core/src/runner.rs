use crate::config::AppConfig;
use crate::media::ExtensionClassifier;
use crate::metadata::DateSource;
use crate::renamer::{rename_entry, RenameOutcome};
use crate::resolver::resolve_capture_time;
use crate::scanner::scan_directory;
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub root: PathBuf,
    pub exclude: Option<PathBuf>,
    pub dry_run: bool,
    pub classifier: ExtensionClassifier,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: None,
            dry_run: false,
            classifier: ExtensionClassifier::default(),
        }
    }
}

impl RunOptions {
    pub fn from_config(config: &AppConfig, root: PathBuf) -> Self {
        Self {
            root,
            exclude: None,
            dry_run: config.dry_run_default,
            classifier: ExtensionClassifier::new(
                config.image_extensions.as_slice(),
                config.video_extensions.as_slice(),
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub original_path: PathBuf,
    pub timestamp: Option<NaiveDateTime>,
    pub source: Option<DateSource>,
    pub outcome: RenameOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RunStats {
    pub scanned_files: usize,
    pub renamed: usize,
    pub planned: usize,
    pub already_named: usize,
    pub collisions: usize,
    pub no_date: usize,
    pub failed: usize,
}

impl RunStats {
    fn record(&mut self, outcome: &RenameOutcome) {
        self.scanned_files += 1;
        match outcome {
            RenameOutcome::Renamed { .. } => self.renamed += 1,
            RenameOutcome::WouldRename { .. } => self.planned += 1,
            RenameOutcome::SkippedAlreadyNamed => self.already_named += 1,
            RenameOutcome::SkippedCollision { .. } => self.collisions += 1,
            RenameOutcome::SkippedNoDate => self.no_date += 1,
            RenameOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    pub stats: RunStats,
}

/// Scans `options.root` once, then resolves and renames each file in turn.
/// `on_report` sees every file as soon as it has been handled.
pub fn run(options: &RunOptions, mut on_report: impl FnMut(&FileReport)) -> Result<RunReport> {
    let entries = scan_directory(
        &options.root,
        options.exclude.as_deref(),
        &options.classifier,
    )?;
    debug!(count = entries.len(), root = %options.root.display(), "scanned directory");

    let mut stats = RunStats::default();
    let mut files = Vec::with_capacity(entries.len());
    for entry in entries {
        let capture = resolve_capture_time(&entry);
        let outcome = rename_entry(&entry, capture.as_ref(), options.dry_run);
        stats.record(&outcome);

        let report = FileReport {
            original_path: entry.path,
            timestamp: capture.map(|c| c.timestamp),
            source: capture.map(|c| c.source),
            outcome,
        };
        on_report(&report);
        files.push(report);
    }

    Ok(RunReport {
        root: options.root.clone(),
        dry_run: options.dry_run,
        files,
        stats,
    })
}
