use std::collections::VecDeque;

use crate::context::{AssetPath, SubtreeRef, TreeContext};
use crate::error::NavError;
use crate::event::{Deferred, Notification, PlayMode, PlayModeChange};
use crate::pending::{CreateNode, NodeId, NodeTypeRegistry, PendingCreates, PendingNodeCreate};
use crate::resolver::TreeResolver;
use crate::stack::{Breadcrumb, NavigationStack};
use crate::store::StateStore;
use crate::view::{ViewEvent, ViewSink};

/// Owns the stack of open trees and keeps the store and the dependent views in
/// step with it.
///
/// Invariant: `displayed()` is either the top of `stack()` or `None`. The
/// stack can outlive the display, e.g. after the displayed document was
/// deleted.
pub struct Navigator<S, V>
where
    S: StateStore,
    V: ViewSink,
{
    stack: NavigationStack,
    displayed: Option<TreeContext>,
    mode: PlayMode,
    deferred: VecDeque<Deferred>,
    pending: PendingCreates,
    store: S,
    views: V,
    persist_failures: usize,
}

impl<S, V> Navigator<S, V>
where
    S: StateStore,
    V: ViewSink,
{
    pub fn new(store: S, views: V) -> Self {
        Self {
            stack: NavigationStack::new(),
            displayed: None,
            mode: PlayMode::default(),
            deferred: VecDeque::new(),
            pending: PendingCreates::new(),
            store,
            views,
            persist_failures: 0,
        }
    }

    /// Creates a navigator and replays the stack saved by the previous session.
    pub fn open<R: TreeResolver>(store: S, views: V, resolver: &R) -> Result<Self, NavError> {
        let mut navigator = Self::new(store, views);
        navigator.restore(resolver)?;
        Ok(navigator)
    }

    /// Discards the in-memory stack. The store keeps the last saved state.
    pub fn close(self) -> (S, V) {
        tracing::debug!(depth = self.stack.depth(), "navigator closed");
        (self.store, self.views)
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.stack.breadcrumbs()
    }

    pub fn displayed(&self) -> Option<&TreeContext> {
        self.displayed.as_ref()
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn views(&self) -> &V {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut V {
        &mut self.views
    }

    /// Number of saves the store rejected since the navigator was created.
    pub fn persist_failures(&self) -> usize {
        self.persist_failures
    }

    pub fn deferred(&self) -> impl Iterator<Item = &Deferred> {
        self.deferred.iter()
    }

    pub fn pending_creates(&self) -> &PendingCreates {
        &self.pending
    }

    /// Jumps to a brand-new top-level tree, dropping any open sub-tree chain.
    /// `None` clears the selection.
    pub fn select_root(&mut self, context: Option<TreeContext>) {
        self.truncate(0);
        match context {
            Some(context) => self.select(context),
            None => self.clear_selection(),
        }
    }

    /// Displays `context` one level above the current top.
    ///
    /// Re-selecting the tree that is already on top keeps the depth but still
    /// rebinds the views.
    pub fn select(&mut self, context: TreeContext) {
        self.select_inner(context, false);
    }

    fn select_inner(&mut self, context: TreeContext, always_push: bool) {
        if self.displayed.as_ref() != Some(&context) {
            self.clear_selection();
        }

        if always_push || self.stack.top() != Some(&context) {
            self.stack.push(context.clone());
            self.persist();
        }

        let depth = self.stack.depth() - 1;
        tracing::debug!(tree = %context.key(), depth, "tree selected");

        self.displayed = Some(context.clone());
        self.views.emit(ViewEvent::Bound { context, depth });
    }

    /// Drills into the tree referenced by a sub-tree node. While playing the
    /// node's live instance is opened, since several running agents may share
    /// one asset.
    pub fn push_subtree(&mut self, subtree: &SubtreeRef) -> Result<(), NavError> {
        let Some(asset) = subtree.asset.as_ref() else {
            tracing::error!("invalid subtree: assign a behaviour tree to the tree asset field");
            return Err(NavError::MissingReference);
        };

        let context = match (self.mode, subtree.instance.as_ref()) {
            (PlayMode::Playing, Some(instance)) => instance.clone(),
            (PlayMode::Playing, None) => {
                tracing::debug!(tree = %asset.key(), "sub-tree has no live instance, opening asset");
                asset.clone()
            }
            (PlayMode::Editing, _) => asset.clone(),
        };

        self.select(context);
        Ok(())
    }

    /// Pops until the stack is `depth` long, saving after every single pop.
    /// With a `target` the target is then appended and displayed (a
    /// breadcrumb click), leaving the stack `depth + 1` long even when the
    /// target already sits on top. Otherwise the display follows whatever is
    /// left on top.
    pub fn pop_to_depth(&mut self, depth: usize, target: Option<TreeContext>) {
        self.truncate(depth);
        match target {
            Some(target) => self.select_inner(target, true),
            None => self.follow_top(),
        }
    }

    /// Navigates to the breadcrumb at `index`, dropping everything above it.
    pub fn click_breadcrumb(&mut self, index: usize) -> Result<(), NavError> {
        let target = self
            .stack
            .get(index)
            .cloned()
            .ok_or(NavError::NoSuchBreadcrumb {
                index,
                depth: self.stack.depth(),
            })?;
        self.pop_to_depth(index, Some(target));
        Ok(())
    }

    /// Replays the saved stack through [`select`](Self::select) so breadcrumbs
    /// and bindings come out exactly as after interactive navigation.
    pub fn restore<R: TreeResolver>(&mut self, resolver: &R) -> Result<(), NavError> {
        let saved = self.store.load()?;
        self.stack.clear();
        self.displayed = None;

        if saved.is_empty() {
            self.views.emit(ViewEvent::OverlayShown);
            return Ok(());
        }

        for key in &saved {
            match resolver.resolve(key) {
                Some(context) => self.select(context),
                None => {
                    tracing::warn!(tree = %key, "skipping unresolvable tree in saved navigation state");
                }
            }
        }

        if self.stack.is_empty() {
            self.persist();
            self.views.emit(ViewEvent::OverlayShown);
        }

        tracing::debug!(
            saved = saved.len(),
            restored = self.stack.depth(),
            "navigation state restored"
        );
        Ok(())
    }

    pub fn handle(&mut self, notification: Notification) {
        match notification {
            Notification::SelectionChanged(Some(context)) => self.select_root(Some(context)),
            Notification::SelectionChanged(None) => {}
            Notification::AssetWillDelete(path) => {
                if self.displayed_path().as_ref() == Some(&path) {
                    tracing::debug!(path = %path, "displayed tree is being deleted");
                    self.deferred.push_back(Deferred::ClearSelection(path));
                }
            }
            Notification::PlayMode(change) => self.on_play_mode(change),
            Notification::UndoRedo => {
                if let Some(context) = self.displayed.clone() {
                    self.views.emit(ViewEvent::Repopulated { context });
                }
            }
            Notification::NodeSelected(node) => {
                if let Some(context) = self.displayed.clone() {
                    self.views.emit(ViewEvent::NodeInspected { context, node });
                }
            }
            Notification::InspectorUpdate => {
                if !self.mode.is_playing() {
                    return;
                }
                if let Some(context) = self.displayed.clone() {
                    self.views.emit(ViewEvent::NodeStatesRefreshed { context });
                }
            }
        }
    }

    /// Runs the work posted by earlier notifications. Call once per event-loop
    /// tick, outside of any notification dispatch. Returns how many deferred
    /// items ran.
    pub fn pump(&mut self) -> usize {
        let mut ran = 0;
        while let Some(work) = self.deferred.pop_front() {
            ran += 1;
            match work {
                // Only the display goes; the stack and saved state stay.
                Deferred::ClearSelection(path) => {
                    if self.displayed_path().as_ref() == Some(&path) {
                        self.clear_selection();
                    }
                }
                Deferred::SyncSelection(Some(context)) => self.select_root(Some(context)),
                Deferred::SyncSelection(None) => {}
            }
        }
        ran
    }

    pub fn request_node_create(&mut self, request: PendingNodeCreate) {
        self.pending.push(request);
    }

    /// Turns queued requests into node creations for the displayed tree. With
    /// no tree displayed the queue is left untouched for a later call.
    pub fn resolve_pending_creates<F>(
        &mut self,
        registry: &NodeTypeRegistry,
        node_exists: F,
    ) -> Vec<CreateNode>
    where
        F: Fn(&NodeId) -> bool,
    {
        if self.displayed.is_none() {
            return Vec::new();
        }
        self.pending.resolve(registry, node_exists)
    }

    fn on_play_mode(&mut self, change: PlayModeChange) {
        match change {
            PlayModeChange::EnteredEditMode { selected } => {
                self.mode = PlayMode::Editing;
                self.deferred.push_back(Deferred::SyncSelection(selected));
            }
            PlayModeChange::ExitingEditMode => {}
            PlayModeChange::EnteredPlayMode { selected } => {
                self.mode = PlayMode::Playing;
                self.deferred.push_back(Deferred::SyncSelection(selected));
            }
            PlayModeChange::ExitingPlayMode => self.views.emit(ViewEvent::InspectorCleared),
        }
    }

    fn displayed_path(&self) -> Option<AssetPath> {
        self.displayed
            .as_ref()
            .and_then(|c| c.key().asset_path())
            .cloned()
    }

    fn truncate(&mut self, depth: usize) {
        while self.stack.depth() > depth {
            self.stack.pop();
            self.persist();
        }
    }

    fn follow_top(&mut self) {
        match self.stack.top().cloned() {
            Some(top) if self.displayed.as_ref() != Some(&top) => {
                self.clear_selection();
                let depth = self.stack.depth() - 1;
                self.displayed = Some(top.clone());
                self.views.emit(ViewEvent::Bound {
                    context: top,
                    depth,
                });
            }
            Some(_) => {}
            None => {
                if self.displayed.is_some() {
                    self.clear_selection();
                }
            }
        }
    }

    fn clear_selection(&mut self) {
        self.displayed = None;
        self.views.emit(ViewEvent::Cleared);
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.stack.keys()) {
            self.persist_failures += 1;
            tracing::warn!(error = %err, depth = self.stack.depth(), "failed to persist navigation state");
        }
    }
}
