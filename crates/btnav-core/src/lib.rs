//! Engine-agnostic navigation stack for nested behaviour-tree documents.
//!
//! A [`Navigator`] tracks the trees a user has drilled into (a root tree and
//! the sub-trees opened from it), persists that stack after every change and
//! replays it on the next open. Hosts plug in a [`StateStore`], a
//! [`TreeResolver`] and a [`ViewSink`], and feed it [`Notification`]s.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod event;
pub mod navigator;
pub mod pending;
pub mod resolver;
pub mod stack;
pub mod store;
pub mod view;

pub use context::{AssetPath, DocumentKey, InstanceId, SubtreeRef, TreeContext};
pub use error::NavError;
pub use event::{Deferred, Notification, PlayMode, PlayModeChange};
pub use navigator::Navigator;
pub use pending::{
    Attach, CreateNode, NodeId, NodeKind, NodeTypeKey, NodeTypeRegistry, PendingCreates,
    PendingNodeCreate, Position,
};
pub use resolver::{MapResolver, TreeResolver};
pub use stack::{format_trail, Breadcrumb, NavigationStack};
pub use store::{MemoryStore, StateStore, StoreError};
pub use view::{NullViewSink, VecViewSink, ViewEvent, ViewSink};
