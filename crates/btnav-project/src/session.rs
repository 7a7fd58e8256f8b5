//! A navigator bound to one project directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use btnav_core::{AssetPath, Navigator, Notification, SubtreeRef, TreeContext, TreeResolver};

use crate::assets::FsTreeResolver;
use crate::config::NavigatorConfig;
use crate::journal::NavJournal;
use crate::store::JsonFileStore;

pub type ProjectNavigator = Navigator<JsonFileStore, NavJournal>;

pub struct ProjectSession {
    root: PathBuf,
    config: NavigatorConfig,
    resolver: FsTreeResolver,
    navigator: ProjectNavigator,
}

impl ProjectSession {
    /// Open a session for a project (reads .btnav/config.yaml if present)
    pub fn open(project_root: &Path) -> Result<Self> {
        let mut config = NavigatorConfig::load_from_project(project_root)?;
        config.resolve_paths(project_root);
        Self::with_config(project_root, config)
    }

    /// Open a session with already-resolved configuration
    pub fn with_config(project_root: &Path, config: NavigatorConfig) -> Result<Self> {
        let store = JsonFileStore::new(&config.state_file);
        let journal = NavJournal::new(&config.journal_file);
        let resolver = FsTreeResolver::new(&config.assets_dir, config.tree_extension.clone());

        let mut navigator = Navigator::new(store, journal);
        if config.restore_on_open {
            navigator.restore(&resolver).with_context(|| {
                format!(
                    "Failed to restore navigation state from {}",
                    config.state_file.display()
                )
            })?;
        }

        tracing::info!(
            project = %project_root.display(),
            depth = navigator.depth(),
            "Session opened"
        );

        Ok(Self {
            root: project_root.to_path_buf(),
            config,
            resolver,
            navigator,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn resolver(&self) -> &FsTreeResolver {
        &self.resolver
    }

    pub fn navigator(&self) -> &ProjectNavigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut ProjectNavigator {
        &mut self.navigator
    }

    /// Asset path for a command-line argument. Relative arguments are taken
    /// relative to the assets directory.
    pub fn asset_path(&self, arg: &str) -> Result<AssetPath> {
        let path = Path::new(arg);
        if path.is_absolute() {
            self.resolver
                .asset_path_for(path)
                .with_context(|| format!("{} is outside {}", arg, self.resolver.root().display()))
        } else {
            Ok(AssetPath::new(arg))
        }
    }

    /// Resolve a tree document, failing if it does not exist.
    pub fn resolve(&self, arg: &str) -> Result<TreeContext> {
        let path = self.asset_path(arg)?;
        self.resolver
            .resolve_path(&path)
            .with_context(|| format!("No tree document at {}", path))
    }

    /// Open a tree as the new root.
    pub fn open_tree(&mut self, arg: &str) -> Result<()> {
        let context = self.resolve(arg)?;
        self.navigator.select_root(Some(context));
        Ok(())
    }

    /// Drill into a sub-tree. A path that does not resolve is treated as an
    /// unassigned sub-tree reference.
    pub fn push_tree(&mut self, arg: &str) -> Result<()> {
        let path = self.asset_path(arg)?;
        let subtree = SubtreeRef {
            asset: self.resolver.resolve_path(&path),
            instance: None,
        };
        self.navigator
            .push_subtree(&subtree)
            .with_context(|| format!("Cannot open sub-tree {}", path))?;
        Ok(())
    }

    /// Deliver an about-to-be-deleted notification for a file, then run the
    /// deferred work it queued. Returns whether the selection was cleared.
    pub fn notify_deleted(&mut self, file: &Path) -> bool {
        let Some(path) = self.resolver.asset_path_for(file) else {
            return false;
        };
        let was_displayed = self.navigator.displayed().is_some();
        self.navigator.handle(Notification::AssetWillDelete(path));
        self.navigator.pump();
        was_displayed && self.navigator.displayed().is_none()
    }
}
