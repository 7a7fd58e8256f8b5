//! Navigator configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Relative location of the config file inside a project.
pub const CONFIG_PATH: &str = ".btnav/config.yaml";

/// Project configuration, loaded from .btnav/config.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Config version
    pub version: Option<String>,

    /// Saved navigation stack (relative to project root)
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Navigation journal (relative to project root)
    #[serde(default = "default_journal_file")]
    pub journal_file: PathBuf,

    /// Directory scanned for tree documents (relative to project root)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// File suffix that marks a behaviour-tree document
    #[serde(default = "default_tree_extension")]
    pub tree_extension: String,

    /// Replay the saved stack when a session opens
    #[serde(default = "default_true")]
    pub restore_on_open: bool,
}

fn default_state_file() -> PathBuf {
    PathBuf::from(".btnav/window_state.json")
}
fn default_journal_file() -> PathBuf {
    PathBuf::from(".btnav/events.jsonl")
}
fn default_assets_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_tree_extension() -> String {
    "tree.json".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            version: None,
            state_file: default_state_file(),
            journal_file: default_journal_file(),
            assets_dir: default_assets_dir(),
            tree_extension: default_tree_extension(),
            restore_on_open: default_true(),
        }
    }
}

impl NavigatorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load from project root (looks for .btnav/config.yaml)
    pub fn load_from_project(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_PATH);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve paths relative to project root
    pub fn resolve_paths(&mut self, project_root: &Path) {
        self.state_file = project_root.join(&self.state_file);
        self.journal_file = project_root.join(&self.journal_file);
        self.assets_dir = project_root.join(&self.assets_dir);
    }

    /// Default config file contents written by `btnav init`.
    pub fn template() -> &'static str {
        r#"# btnav configuration

state_file: .btnav/window_state.json
journal_file: .btnav/events.jsonl

# Where tree documents live, and how they are recognised
assets_dir: .
tree_extension: tree.json

restore_on_open: true
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: NavigatorConfig = serde_yaml::from_str("tree_extension: bt.yaml\n").unwrap();
        assert_eq!(config.tree_extension, "bt.yaml");
        assert_eq!(config.state_file, PathBuf::from(".btnav/window_state.json"));
        assert!(config.restore_on_open);
    }

    #[test]
    fn template_parses_to_defaults() {
        let config: NavigatorConfig = serde_yaml::from_str(NavigatorConfig::template()).unwrap();
        let defaults = NavigatorConfig::default();
        assert_eq!(config.state_file, defaults.state_file);
        assert_eq!(config.journal_file, defaults.journal_file);
        assert_eq!(config.assets_dir, defaults.assets_dir);
        assert_eq!(config.tree_extension, defaults.tree_extension);
    }

    #[test]
    fn resolve_paths_anchors_at_project_root() {
        let mut config = NavigatorConfig::default();
        config.resolve_paths(Path::new("/work/game"));
        assert_eq!(
            config.state_file,
            PathBuf::from("/work/game/.btnav/window_state.json")
        );
        assert_eq!(config.assets_dir, PathBuf::from("/work/game/."));
    }
}
