//! Shopping cart domain types and persisted cart store for the Southside
//! storefront.
//!
//! The cart is a persisted, quantity-merged collection of line items keyed
//! by product: adding a product already in the cart grows its quantity
//! instead of duplicating the row, quantities are clamped to the stock
//! ceiling snapshotted when the product was added, and rows whose quantity
//! drops to zero disappear. State lives under a single key in a
//! [`southside_kv`] backend as a JSON-encoded array, so tests inject an
//! in-memory backend and real deployments a durable one.
//!
//! # Example
//!
//! ```rust,ignore
//! use southside_cart::prelude::*;
//! use southside_kv::MemoryBackend;
//!
//! let cart = CartStore::new(MemoryBackend::new());
//!
//! // Put two bags of beans in the cart
//! let beans = ProductSnapshot::new(42, "Flat White Beans", Money::new(1850, Currency::AUD), 12);
//! cart.add_item(beans, 2);
//!
//! println!("{} items, {}", cart.item_count(), cart.total());
//!
//! // Build the order payload at checkout
//! let order = OrderRequest::from_items(user_id, &cart.items(), payment, shipping, None)?;
//! ```

pub mod checkout;
pub mod error;
pub mod ids;
pub mod item;
pub mod money;
pub mod store;

pub use checkout::{OrderItem, OrderRequest, PaymentMethod, ShippingDetails};
pub use error::CartError;
pub use ids::{MerchantId, ProductId, UserId};
pub use item::{CartItem, ProductSnapshot};
pub use money::{Currency, Money};
pub use store::{CartStore, CART_STORAGE_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::checkout::{OrderItem, OrderRequest, PaymentMethod, ShippingDetails};
    pub use crate::error::CartError;
    pub use crate::ids::{MerchantId, ProductId, UserId};
    pub use crate::item::{CartItem, ProductSnapshot};
    pub use crate::money::{Currency, Money};
    pub use crate::store::{CartStore, CART_STORAGE_KEY};
}
