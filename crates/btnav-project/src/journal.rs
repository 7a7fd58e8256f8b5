//! Navigation journal - an append-only record of view events.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use btnav_core::{ViewEvent, ViewSink};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One journal line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub tree: Option<String>,
    pub depth: Option<usize>,
    #[serde(default)]
    pub node: Option<String>,
}

impl JournalEntry {
    pub fn from_event(event: &ViewEvent) -> Self {
        let depth = match event {
            ViewEvent::Bound { depth, .. } => Some(*depth),
            _ => None,
        };
        let node = match event {
            ViewEvent::NodeInspected { node, .. } => Some(node.to_string()),
            _ => None,
        };
        Self {
            timestamp: Utc::now(),
            event_type: event.tag().to_string(),
            tree: event.context().map(|c| c.key().to_string()),
            depth,
            node,
        }
    }
}

/// Appends view events to a JSONL file.
pub struct NavJournal {
    path: PathBuf,
    write_failures: usize,
}

impl NavJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_failures: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_failures(&self) -> usize {
        self.write_failures
    }

    /// Append an entry.
    pub fn append(&self, entry: &JournalEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let line = serde_json::to_string(entry)?;
        writeln!(file, "{}", line)?;

        Ok(())
    }

    /// Read the last `limit` entries. Unreadable lines are skipped.
    pub fn read_recent(&self, limit: usize) -> Vec<JournalEntry> {
        let file = match std::fs::File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return Vec::new(),
        };

        let reader = BufReader::new(file);
        let mut entries: Vec<JournalEntry> = reader
            .lines()
            .map_while(|line| line.ok())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect();

        if entries.len() > limit {
            entries.drain(0..entries.len() - limit);
        }

        entries
    }
}

impl ViewSink for NavJournal {
    fn emit(&mut self, event: ViewEvent) {
        if let Err(err) = self.append(&JournalEntry::from_event(&event)) {
            self.write_failures += 1;
            tracing::warn!(error = %err, path = %self.path.display(), "failed to write navigation journal");
        }
    }
}
