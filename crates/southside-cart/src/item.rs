//! Cart line item types.

use crate::ids::{MerchantId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Catalog data captured when a product is put in the cart.
///
/// Price and stock are snapshots taken at add time; the cart never
/// refreshes them from the catalog. This is the payload for
/// [`CartStore::add_item`](crate::store::CartStore::add_item) — a cart row
/// minus its quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Product image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    /// Unit price at add time.
    pub price: Money,
    /// Purchasable quantity ceiling at add time.
    pub stock: i64,
    /// Selling merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<MerchantId>,
    /// Merchant display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    /// Free-text notes, e.g. special instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProductSnapshot {
    /// Create a snapshot with the required fields.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            product_image: None,
            price,
            stock,
            merchant_id: None,
            merchant_name: None,
            notes: None,
        }
    }

    /// Attach a product image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.product_image = Some(url.into());
        self
    }

    /// Attach merchant information.
    pub fn with_merchant(mut self, id: impl Into<MerchantId>, name: impl Into<String>) -> Self {
        self.merchant_id = Some(id.into());
        self.merchant_name = Some(name.into());
        self
    }

    /// Attach free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// One product's row in the cart.
///
/// Serialized field names match the persisted cart layout, which keys rows
/// in camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product being purchased (unique within the cart).
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Product image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,
    /// Unit price snapshot.
    pub price: Money,
    /// Quantity in the cart.
    pub quantity: i64,
    /// Stock ceiling snapshot.
    pub stock: i64,
    /// Selling merchant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<MerchantId>,
    /// Merchant display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CartItem {
    /// Create a row from a catalog snapshot and a quantity.
    pub fn from_snapshot(snapshot: ProductSnapshot, quantity: i64) -> Self {
        Self {
            product_id: snapshot.product_id,
            product_name: snapshot.product_name,
            product_image: snapshot.product_image,
            price: snapshot.price,
            quantity,
            stock: snapshot.stock,
            merchant_id: snapshot.merchant_id,
            merchant_name: snapshot.merchant_name,
            notes: snapshot.notes,
        }
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}
