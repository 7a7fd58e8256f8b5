use crate::context::TreeContext;
use crate::pending::NodeId;

/// Signals for the views that depend on the displayed tree (graph view,
/// inspector, blackboard panel, empty-state overlay).
///
/// This is plain data so hosts can forward it to whatever UI they own, and
/// tests can record it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Displayed tree dropped: graph, inspector and blackboard cleared, the
    /// "no tree selected" overlay shown.
    Cleared,
    /// Nothing to restore on open; overlay shown.
    OverlayShown,
    /// A tree became (or stayed) displayed. Rebind everything to it.
    Bound { context: TreeContext, depth: usize },
    /// Undo/redo touched the document; rebuild the graph view.
    Repopulated { context: TreeContext },
    /// Inspector cleared while leaving play mode.
    InspectorCleared,
    /// A node was selected in the graph view.
    NodeInspected { context: TreeContext, node: NodeId },
    /// Live node states changed while playing.
    NodeStatesRefreshed { context: TreeContext },
}

impl ViewEvent {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Cleared => "cleared",
            Self::OverlayShown => "overlay_shown",
            Self::Bound { .. } => "bound",
            Self::Repopulated { .. } => "repopulated",
            Self::InspectorCleared => "inspector_cleared",
            Self::NodeInspected { .. } => "node_inspected",
            Self::NodeStatesRefreshed { .. } => "node_states_refreshed",
        }
    }

    pub fn context(&self) -> Option<&TreeContext> {
        match self {
            Self::Bound { context, .. }
            | Self::Repopulated { context }
            | Self::NodeInspected { context, .. }
            | Self::NodeStatesRefreshed { context } => Some(context),
            Self::Cleared | Self::OverlayShown | Self::InspectorCleared => None,
        }
    }
}

pub trait ViewSink {
    fn emit(&mut self, event: ViewEvent);
}

#[derive(Debug, Default)]
pub struct NullViewSink;

impl ViewSink for NullViewSink {
    fn emit(&mut self, _event: ViewEvent) {}
}

#[derive(Debug, Default)]
pub struct VecViewSink {
    pub events: Vec<ViewEvent>,
}

impl VecViewSink {
    /// Takes the recorded events, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

impl ViewSink for VecViewSink {
    fn emit(&mut self, event: ViewEvent) {
        self.events.push(event);
    }
}

impl<S: ViewSink + ?Sized> ViewSink for Box<S> {
    fn emit(&mut self, event: ViewEvent) {
        (**self).emit(event);
    }
}

impl<S: ViewSink + ?Sized> ViewSink for &mut S {
    fn emit(&mut self, event: ViewEvent) {
        (**self).emit(event);
    }
}
