//! btnav project host.
//!
//! Binds the engine-agnostic navigator from `btnav-core` to a project
//! directory: a JSON state file, tree documents found on disk, YAML
//! configuration and a JSONL journal of view events.

pub mod assets;
pub mod config;
pub mod journal;
pub mod session;
pub mod store;

pub use assets::FsTreeResolver;
pub use config::NavigatorConfig;
pub use journal::{JournalEntry, NavJournal};
pub use session::{ProjectNavigator, ProjectSession};
pub use store::{JsonFileStore, WindowState};
