use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("sub-tree node has no behaviour tree assigned")]
    MissingReference,

    #[error("breadcrumb {index} does not exist (stack depth {depth})")]
    NoSuchBreadcrumb { index: usize, depth: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}
