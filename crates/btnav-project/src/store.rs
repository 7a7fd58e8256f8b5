//! File-backed navigation state.

use std::path::{Path, PathBuf};

use btnav_core::{DocumentKey, StateStore, StoreError};
use serde::{Deserialize, Serialize};

const STATE_VERSION: u32 = 1;

/// On-disk layout of the saved navigation stack.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowState {
    pub version: u32,
    #[serde(default)]
    pub tree_stack: Vec<DocumentKey>,
}

/// Stores the navigation stack as a small JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&mut self) -> Result<Vec<DocumentKey>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let state: WindowState = serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))?;
        if state.version > STATE_VERSION {
            return Err(StoreError::Corrupt(format!(
                "{}: unsupported state version {}",
                self.path.display(),
                state.version
            )));
        }
        Ok(state.tree_stack)
    }

    fn save(&mut self, stack: &[DocumentKey]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let state = WindowState {
            version: STATE_VERSION,
            tree_stack: stack.to_vec(),
        };
        let json = serde_json::to_string_pretty(&state)
            .map_err(|e| StoreError::Backend(Box::new(e)))?;

        // Readers only ever see a complete file.
        let tmp = self.tmp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;

        tracing::trace!(path = %self.path.display(), depth = stack.len(), "navigation state saved");
        Ok(())
    }
}
