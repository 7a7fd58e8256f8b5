use thiserror::Error;

use crate::context::DocumentKey;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("persisted navigation state is corrupt: {0}")]
    Corrupt(String),

    #[error("state store backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Durable home of the navigation stack.
///
/// `save` receives the whole stack, bottom first, after every push and every
/// single pop.
pub trait StateStore {
    fn load(&mut self) -> Result<Vec<DocumentKey>, StoreError>;

    fn save(&mut self, stack: &[DocumentKey]) -> Result<(), StoreError>;
}

/// In-memory store that keeps every snapshot it was asked to save.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    current: Vec<DocumentKey>,
    pub saves: Vec<Vec<DocumentKey>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds a stack from a previous session.
    pub fn with_stack(stack: Vec<DocumentKey>) -> Self {
        Self {
            current: stack,
            saves: Vec::new(),
        }
    }

    pub fn current(&self) -> &[DocumentKey] {
        &self.current
    }
}

impl StateStore for MemoryStore {
    fn load(&mut self) -> Result<Vec<DocumentKey>, StoreError> {
        Ok(self.current.clone())
    }

    fn save(&mut self, stack: &[DocumentKey]) -> Result<(), StoreError> {
        self.current = stack.to_vec();
        self.saves.push(self.current.clone());
        Ok(())
    }
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
    fn load(&mut self) -> Result<Vec<DocumentKey>, StoreError> {
        (**self).load()
    }

    fn save(&mut self, stack: &[DocumentKey]) -> Result<(), StoreError> {
        (**self).save(stack)
    }
}
