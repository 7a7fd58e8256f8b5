//! Tree documents on disk.

use std::path::{Path, PathBuf};

use btnav_core::{AssetPath, DocumentKey, TreeContext, TreeResolver};
use walkdir::WalkDir;

/// Resolves document keys against files under an assets directory.
///
/// Runtime instances never resolve: outside a running host there is no live
/// copy of any tree.
#[derive(Debug, Clone)]
pub struct FsTreeResolver {
    root: PathBuf,
    /// `root` with symlinks resolved, if it exists. File watchers report
    /// canonical paths.
    canonical_root: Option<PathBuf>,
    extension: String,
}

impl FsTreeResolver {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let root = root.into();
        let extension = extension.into();
        Self {
            canonical_root: root.canonicalize().ok(),
            root,
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_tree_file(&self, path: &Path) -> bool {
        self.tree_name(path).is_some()
    }

    /// All tree documents under the root, sorted by path.
    pub fn list(&self) -> Vec<TreeContext> {
        let mut trees: Vec<TreeContext> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = self.asset_path_for(e.path())?;
                self.resolve_path(&path)
            })
            .collect();
        trees.sort_by(|a, b| a.key().cmp(b.key()));
        trees
    }

    /// Project-relative asset path of a file under the root. The file need not
    /// exist any more, but its directory must for symlinked roots to match.
    pub fn asset_path_for(&self, file: &Path) -> Option<AssetPath> {
        let relative = self
            .strip_root(file)
            .or_else(|| self.strip_root(&canonical_parent(file)?))?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            return None;
        }
        Some(AssetPath::new(parts.join("/")))
    }

    fn strip_root(&self, file: &Path) -> Option<PathBuf> {
        if let Ok(relative) = file.strip_prefix(&self.root) {
            return Some(relative.to_path_buf());
        }
        let canonical = self.canonical_root.as_ref()?;
        file.strip_prefix(canonical).ok().map(Path::to_path_buf)
    }

    fn tree_name(&self, path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_str()?;
        let stem = file_name.strip_suffix(&self.extension)?.strip_suffix('.')?;
        if stem.is_empty() {
            None
        } else {
            Some(stem.to_string())
        }
    }
}

impl TreeResolver for FsTreeResolver {
    fn resolve(&self, key: &DocumentKey) -> Option<TreeContext> {
        let path = key.asset_path()?;
        let file = self.root.join(path.as_str());
        if !file.is_file() {
            return None;
        }
        let name = self.tree_name(&file)?;
        Some(TreeContext::asset(path.clone(), name))
    }
}

fn canonical_parent(file: &Path) -> Option<PathBuf> {
    let parent = file.parent()?.canonicalize().ok()?;
    Some(parent.join(file.file_name()?))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map(|s| s.starts_with('.')).unwrap_or(false)
}
