//! Type-safe key-value persistence layer for the Southside storefront.
//!
//! Provides a simple, ergonomic API for persisting data under string keys
//! with automatic JSON serialization. Storage backends are pluggable:
//! [`FileBackend`] keeps one file per key on disk, [`MemoryBackend`] keeps
//! everything in a `HashMap` for tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use southside_kv::{Kv, MemoryBackend};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Cart {
//!     items: Vec<CartItem>,
//! }
//!
//! let kv = Kv::new(MemoryBackend::new());
//!
//! // Store a value
//! kv.set("southside_cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = kv.get("southside_cart")?;
//!
//! // Delete a value
//! kv.delete("southside_cart")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::KvError;
pub use kv::Kv;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileBackend, Kv, KvBackend, KvError, MemoryBackend};
}
