use crate::context::{AssetPath, TreeContext};
use crate::pending::NodeId;

/// Host callbacks the navigator reacts to. Delivered one at a time on the UI
/// thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The host selection changed. Carries the tree driven by the selected
    /// object, if it has one.
    SelectionChanged(Option<TreeContext>),
    /// A document is about to be deleted.
    AssetWillDelete(AssetPath),
    PlayMode(PlayModeChange),
    UndoRedo,
    NodeSelected(NodeId),
    /// Periodic inspector refresh tick.
    InspectorUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayModeChange {
    EnteredEditMode { selected: Option<TreeContext> },
    ExitingEditMode,
    EnteredPlayMode { selected: Option<TreeContext> },
    ExitingPlayMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    #[default]
    Editing,
    Playing,
}

impl PlayMode {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }
}

/// Work posted from inside a notification and run on the next [`pump`].
///
/// [`pump`]: crate::Navigator::pump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// The document at this path is going away; drop it if still displayed.
    ClearSelection(AssetPath),
    /// Play mode changed; re-apply whatever the host had selected.
    SyncSelection(Option<TreeContext>),
}
