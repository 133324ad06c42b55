//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// The [`CartStore`](crate::store::CartStore) surface never returns these;
/// read corruption and write failures are absorbed there. They are used by
/// the internal decode step and by the order-request builder.
#[derive(Error, Debug)]
pub enum CartError {
    /// Storage layer failure.
    #[error("Storage error: {0}")]
    Storage(#[from] southside_kv::KvError),

    /// Cart has no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}
