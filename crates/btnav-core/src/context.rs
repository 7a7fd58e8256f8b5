#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Project-relative path of a tree document, always using `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssetPath(String);

impl AssetPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path component, e.g. `enemy.tree.json` for `ai/enemy.tree.json`.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for AssetPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Identifier of a live runtime copy of a tree, only meaningful while playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InstanceId(pub u64);

/// Identity of a tree document. Two contexts are the same tree iff their keys
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DocumentKey {
    Asset {
        path: AssetPath,
    },
    Instance {
        asset: AssetPath,
        instance: InstanceId,
    },
}

impl DocumentKey {
    pub fn asset(path: impl Into<AssetPath>) -> Self {
        Self::Asset { path: path.into() }
    }

    pub fn instance(asset: impl Into<AssetPath>, instance: InstanceId) -> Self {
        Self::Instance {
            asset: asset.into(),
            instance,
        }
    }

    /// Path of the document on disk. Runtime instances are clones with no
    /// backing file of their own, so they have none.
    pub fn asset_path(&self) -> Option<&AssetPath> {
        match self {
            Self::Asset { path } => Some(path),
            Self::Instance { .. } => None,
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, Self::Instance { .. })
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset { path } => write!(f, "{path}"),
            Self::Instance { asset, instance } => write!(f, "{asset}#{}", instance.0),
        }
    }
}

/// An open behaviour-tree document: either a static asset or a runtime instance.
#[derive(Debug, Clone)]
pub struct TreeContext {
    key: DocumentKey,
    name: String,
}

impl TreeContext {
    pub fn new(key: DocumentKey, name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
        }
    }

    pub fn asset(path: impl Into<AssetPath>, name: impl Into<String>) -> Self {
        Self::new(DocumentKey::asset(path), name)
    }

    pub fn instance(asset: impl Into<AssetPath>, instance: InstanceId, name: impl Into<String>) -> Self {
        Self::new(DocumentKey::instance(asset, instance), name)
    }

    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Document name, used as the breadcrumb label.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for TreeContext {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for TreeContext {}

/// What a sub-tree node points at. `asset` is unset when the node has not been
/// assigned a document yet; `instance` only exists while a simulation runs.
#[derive(Debug, Clone, Default)]
pub struct SubtreeRef {
    pub asset: Option<TreeContext>,
    pub instance: Option<TreeContext>,
}

impl SubtreeRef {
    pub fn new(asset: TreeContext) -> Self {
        Self {
            asset: Some(asset),
            instance: None,
        }
    }

    pub fn with_instance(mut self, instance: TreeContext) -> Self {
        self.instance = Some(instance);
        self
    }
}
