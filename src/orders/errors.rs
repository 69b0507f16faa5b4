//! Order store errors.

use thiserror::Error;

use crate::{orders::OrderId, storage::StorageError};

#[derive(Debug, Error)]
/// Errors raised by the [`OrderStore`](super::OrderStore).
pub enum OrderStoreError {
    /// No order with this id exists in the history.
    #[error("order {0} not found")]
    NotFound(OrderId),

    /// The pending or history key could not be read or written.
    #[error("order storage error")]
    Storage(#[from] StorageError),
}
