//! Append-only CSV log of finished sessions.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{app_dirs::AppDirs, engine::SessionSummary};

/// One row of the history file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    pub dojo: String,
    pub sets: String,
    pub mode: String,
    pub direction: String,
    pub timed: bool,
    pub score: usize,
    pub attempts: usize,
    pub accuracy: f64,
    pub best_streak: usize,
    pub elapsed_secs: f64,
    pub mean_response_secs: Option<f64>,
    pub finish_reason: String,
}

impl HistoryRecord {
    pub fn from_summary(summary: &SessionSummary) -> Self {
        Self {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            dojo: summary.dojo_label.clone(),
            sets: summary.selected_sets.join("; "),
            mode: summary.mode.to_string(),
            direction: summary.direction.to_string(),
            timed: summary.timed,
            score: summary.score,
            attempts: summary.attempts,
            accuracy: summary.accuracy,
            best_streak: summary.best_streak,
            elapsed_secs: (summary.elapsed_secs * 100.0).round() / 100.0,
            mean_response_secs: summary
                .mean_response_secs
                .map(|secs| (secs * 100.0).round() / 100.0),
            finish_reason: summary
                .finish_reason
                .map(|reason| reason.to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Log in the application state directory, if one can be resolved.
    pub fn new() -> Option<Self> {
        AppDirs::history_path().map(|path| Self { path })
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, summary: &SessionSummary) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(HistoryRecord::from_summary(summary))?;
        writer.flush()?;

        tracing::debug!(path = %self.path.display(), "session appended to history");
        Ok(())
    }

    /// Every recorded session, oldest first. A missing file is an empty history.
    pub fn read_all(&self) -> io::Result<Vec<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }
}
