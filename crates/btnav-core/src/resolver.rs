use std::collections::BTreeMap;

use crate::context::{AssetPath, DocumentKey, TreeContext};

/// Maps persisted document keys back to live contexts.
pub trait TreeResolver {
    fn resolve(&self, key: &DocumentKey) -> Option<TreeContext>;

    fn resolve_path(&self, path: &AssetPath) -> Option<TreeContext> {
        self.resolve(&DocumentKey::Asset { path: path.clone() })
    }
}

/// Fixed table of known documents.
#[derive(Debug, Default, Clone)]
pub struct MapResolver {
    trees: BTreeMap<DocumentKey, TreeContext>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, context: TreeContext) {
        self.trees.insert(context.key().clone(), context);
    }
}

impl FromIterator<TreeContext> for MapResolver {
    fn from_iter<I: IntoIterator<Item = TreeContext>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for context in iter {
            resolver.insert(context);
        }
        resolver
    }
}

impl TreeResolver for MapResolver {
    fn resolve(&self, key: &DocumentKey) -> Option<TreeContext> {
        self.trees.get(key).cloned()
    }
}
