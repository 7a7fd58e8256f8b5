use crate::context::{DocumentKey, TreeContext};

/// Ordered trees the user has drilled through. The last entry is the active
/// one; an empty stack means nothing is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<TreeContext>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&TreeContext> {
        self.entries.last()
    }

    pub fn get(&self, depth: usize) -> Option<&TreeContext> {
        self.entries.get(depth)
    }

    pub fn push(&mut self, context: TreeContext) {
        self.entries.push(context);
    }

    pub fn pop(&mut self) -> Option<TreeContext> {
        self.entries.pop()
    }

    /// Drops everything without going through the pop path.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &TreeContext> {
        self.entries.iter()
    }

    pub fn keys(&self) -> Vec<DocumentKey> {
        self.entries.iter().map(|c| c.key().clone()).collect()
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.entries
            .iter()
            .enumerate()
            .map(|(depth, context)| Breadcrumb {
                depth,
                label: context.name().to_string(),
                context: context.clone(),
            })
            .collect()
    }
}

/// One rendered entry of the stack. Clicking it navigates with
/// `Navigator::pop_to_depth(crumb.depth, Some(crumb.context))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Stack length at the time this entry was pushed.
    pub depth: usize,
    pub label: String,
    pub context: TreeContext,
}

/// Renders a breadcrumb trail as `root > sub > leaf`.
pub fn format_trail(crumbs: &[Breadcrumb]) -> String {
    crumbs
        .iter()
        .map(|c| c.label.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}
