//! The persisted cart store.

use crate::error::CartError;
use crate::ids::ProductId;
use crate::item::{CartItem, ProductSnapshot};
use crate::money::{Currency, Money};
use southside_kv::{Kv, KvBackend};

/// Storage key the cart lives under.
pub const CART_STORAGE_KEY: &str = "southside_cart";

/// Durable shopping cart backed by a key-value store.
///
/// The cart is one JSON-encoded array of [`CartItem`] under a single key,
/// unique by product, insertion order preserved. Every mutation is a full
/// read-modify-write of that key; across stores sharing a backend the last
/// writer wins.
///
/// No operation returns an error or panics: missing or corrupt persisted
/// state reads as an empty cart, and write failures are logged and dropped.
pub struct CartStore<B> {
    kv: Kv<B>,
    key: String,
    currency: Currency,
}

impl<B: KvBackend> CartStore<B> {
    /// Create a store on the default key, [`CART_STORAGE_KEY`].
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, CART_STORAGE_KEY)
    }

    /// Create a store on a custom key.
    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            kv: Kv::new(backend),
            key: key.into(),
            currency: Currency::default(),
        }
    }

    /// Set the currency used for derived totals.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// The storage key this cart lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current cart contents, in insertion order.
    ///
    /// Absent or unreadable persisted state degrades to an empty cart.
    pub fn items(&self) -> Vec<CartItem> {
        match self.load() {
            Ok(items) => items,
            Err(err) => {
                tracing::debug!(key = %self.key, error = %err, "cart state unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn load(&self) -> Result<Vec<CartItem>, CartError> {
        Ok(self.kv.get(&self.key)?.unwrap_or_default())
    }

    /// Persist the full cart, replacing whatever is stored.
    ///
    /// No validation is performed; callers own the invariants. Write
    /// failures are logged and swallowed.
    pub fn save(&self, items: &[CartItem]) {
        if let Err(err) = self.kv.set(&self.key, &items) {
            tracing::warn!(key = %self.key, error = %err, "failed to persist cart");
        }
    }

    /// Add a product to the cart.
    ///
    /// If the product is already in the cart its quantity grows by
    /// `quantity` and is clamped to the incoming snapshot's stock; the
    /// stored price, image and stock are not refreshed. Otherwise a new row
    /// is appended with the requested quantity. Quantities below 1 are
    /// treated as 1.
    pub fn add_item(&self, product: ProductSnapshot, quantity: i64) {
        let quantity = quantity.max(1);
        let mut items = self.items();

        if let Some(pos) = items
            .iter()
            .position(|item| item.product_id == product.product_id)
        {
            let merged = items[pos].quantity.saturating_add(quantity);
            let clamped = merged.min(product.stock);
            if clamped <= 0 {
                // Stock ceiling of zero or less leaves nothing purchasable
                items.remove(pos);
            } else {
                items[pos].quantity = clamped;
            }
        } else {
            items.push(CartItem::from_snapshot(product, quantity));
        }

        self.save(&items);
    }

    /// Remove a product's row. Returns whether anything was removed.
    pub fn remove_item(&self, product_id: ProductId) -> bool {
        let mut items = self.items();
        let len_before = items.len();
        items.retain(|item| item.product_id != product_id);
        let removed = items.len() < len_before;
        if removed {
            self.save(&items);
        }
        removed
    }

    /// Replace a product's quantity.
    ///
    /// A quantity of zero or less removes the row. Otherwise the quantity
    /// is clamped to the row's stored stock ceiling. No-op if the product
    /// is not in the cart.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let mut items = self.items();
        let Some(pos) = items.iter().position(|item| item.product_id == product_id) else {
            return;
        };

        let clamped = quantity.min(items[pos].stock);
        if clamped <= 0 {
            items.remove(pos);
        } else {
            items[pos].quantity = clamped;
        }
        self.save(&items);
    }

    /// Delete all persisted cart state.
    pub fn clear(&self) {
        if let Err(err) = self.kv.delete(&self.key) {
            tracing::warn!(key = %self.key, error = %err, "failed to clear cart");
        }
    }

    /// Total item count: sum of quantities across all rows.
    pub fn item_count(&self) -> i64 {
        self.items().iter().map(|item| item.quantity).sum()
    }

    /// Cart total: sum of price times quantity across all rows.
    pub fn total(&self) -> Money {
        let cents = self
            .items()
            .iter()
            .fold(0i64, |acc, item| {
                acc.saturating_add(item.line_total().amount_cents)
            });
        Money::new(cents, self.currency)
    }

    /// Cart subtotal. Identical to [`total`](Self::total); the checkout
    /// page displays it before shipping is chosen.
    pub fn subtotal(&self) -> Money {
        self.total()
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items()
            .iter()
            .any(|item| item.product_id == product_id)
    }

    /// Get a product's row, if present.
    pub fn get_item(&self, product_id: ProductId) -> Option<CartItem> {
        self.items()
            .into_iter()
            .find(|item| item.product_id == product_id)
    }

    /// Check if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use southside_kv::MemoryBackend;

    fn store() -> CartStore<MemoryBackend> {
        CartStore::new(MemoryBackend::new())
    }

    fn beans(stock: i64) -> ProductSnapshot {
        ProductSnapshot::new(1, "Flat White Beans", Money::new(1850, Currency::AUD), stock)
    }

    fn mug() -> ProductSnapshot {
        ProductSnapshot::new(2, "Enamel Mug", Money::new(900, Currency::AUD), 8)
    }

    #[test]
    fn test_empty_store_reads_empty() {
        let store = store();
        assert!(store.items().is_empty());
        assert_eq!(store.item_count(), 0);
        assert!(store.total().is_zero());
    }

    #[test]
    fn test_add_item_appends_row() {
        let store = store();
        store.add_item(beans(12), 2);
        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].product_id, ProductId::new(1));
    }

    #[test]
    fn test_repeat_add_merges_into_one_row() {
        let store = store();
        store.add_item(beans(12), 2);
        store.add_item(beans(12), 3);
        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[test]
    fn test_merge_clamps_to_stock() {
        let store = store();
        store.add_item(beans(5), 3);
        store.add_item(beans(5), 4);
        // 3 + 4 = 7, clamped to stock 5
        assert_eq!(store.get_item(ProductId::new(1)).unwrap().quantity, 5);
    }

    #[test]
    fn test_repeat_add_does_not_refresh_snapshot() {
        let store = store();
        store.add_item(beans(12), 1);
        let fresher =
            ProductSnapshot::new(1, "Flat White Beans", Money::new(2100, Currency::AUD), 20);
        store.add_item(fresher, 1);
        let item = store.get_item(ProductId::new(1)).unwrap();
        assert_eq!(item.price, Money::new(1850, Currency::AUD));
        assert_eq!(item.stock, 12);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let store = store();
        store.add_item(beans(12), 1);
        store.add_item(mug(), 1);
        store.add_item(beans(12), 1);
        let ids: Vec<i64> = store.items().iter().map(|i| i.product_id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_add_with_zero_quantity_inserts_one() {
        let store = store();
        store.add_item(beans(12), 0);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_add_with_negative_quantity_inserts_one() {
        let store = store();
        store.add_item(beans(12), -5);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let store = store();
        store.add_item(beans(12), 1);
        assert!(store.remove_item(ProductId::new(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_item_is_noop() {
        let store = store();
        store.add_item(beans(12), 2);
        assert!(!store.remove_item(ProductId::new(99)));
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_update_quantity_replaces() {
        let store = store();
        store.add_item(beans(12), 1);
        store.update_quantity(ProductId::new(1), 6);
        assert_eq!(store.get_item(ProductId::new(1)).unwrap().quantity, 6);
    }

    #[test]
    fn test_update_quantity_clamps_to_stored_stock() {
        let store = store();
        store.add_item(beans(4), 1);
        store.update_quantity(ProductId::new(1), 10);
        assert_eq!(store.get_item(ProductId::new(1)).unwrap().quantity, 4);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let store = store();
        store.add_item(beans(12), 3);
        store.update_quantity(ProductId::new(1), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let store = store();
        store.add_item(beans(12), 3);
        store.update_quantity(ProductId::new(1), -5);
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_quantity_missing_product_is_noop() {
        let store = store();
        store.add_item(beans(12), 2);
        store.update_quantity(ProductId::new(99), 5);
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let store = store();
        store.add_item(beans(12), 2);
        store.add_item(mug(), 3);
        assert_eq!(store.item_count(), 5);
    }

    #[test]
    fn test_total_sums_price_times_quantity() {
        let store = store();
        store.add_item(
            ProductSnapshot::new(1, "A", Money::new(1000, Currency::AUD), 10),
            2,
        );
        store.add_item(
            ProductSnapshot::new(2, "B", Money::new(500, Currency::AUD), 10),
            3,
        );
        // 10.00 * 2 + 5.00 * 3 = 35.00
        assert_eq!(store.total(), Money::new(3500, Currency::AUD));
        assert_eq!(store.subtotal(), store.total());
        assert_eq!(store.item_count(), 5);
    }

    #[test]
    fn test_clear() {
        let store = store();
        store.add_item(beans(12), 2);
        store.add_item(mug(), 1);
        store.clear();
        assert!(store.items().is_empty());
        assert_eq!(store.item_count(), 0);
        assert!(store.total().is_zero());
    }

    #[test]
    fn test_contains_and_get_item() {
        let store = store();
        store.add_item(beans(12), 1);
        assert!(store.contains(ProductId::new(1)));
        assert!(!store.contains(ProductId::new(2)));
        assert!(store.get_item(ProductId::new(1)).is_some());
        assert!(store.get_item(ProductId::new(2)).is_none());
    }

    #[test]
    fn test_save_items_roundtrip() {
        let store = store();
        let items = vec![
            CartItem::from_snapshot(beans(12), 2),
            CartItem::from_snapshot(mug(), 1),
        ];
        store.save(&items);
        assert_eq!(store.items(), items);
    }

    #[test]
    fn test_corrupt_state_reads_as_empty() {
        let backend = MemoryBackend::new();
        backend.set(CART_STORAGE_KEY, b"{ not a cart").unwrap();
        let store = CartStore::new(backend);
        assert!(store.items().is_empty());
        assert_eq!(store.item_count(), 0);
        assert!(store.total().is_zero());
    }

    #[test]
    fn test_mutation_recovers_from_corrupt_state() {
        let backend = MemoryBackend::new();
        backend.set(CART_STORAGE_KEY, b"[[[").unwrap();
        let store = CartStore::new(backend);
        store.add_item(beans(12), 1);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_stores_on_distinct_keys_are_independent() {
        let backend = MemoryBackend::new();
        let a = CartStore::with_key(&backend, "cart_a");
        let b = CartStore::with_key(&backend, "cart_b");
        a.add_item(beans(12), 1);
        assert!(b.is_empty());
        assert_eq!(a.item_count(), 1);
    }

    #[test]
    fn test_last_writer_wins_across_stores() {
        let backend = MemoryBackend::new();
        let a = CartStore::new(&backend);
        let b = CartStore::new(&backend);
        a.add_item(beans(12), 1);
        b.add_item(mug(), 1);
        // Sequential ops re-read before writing, so both rows survive.
        assert_eq!(a.items().len(), 2);
        // A stale full save from one store replaces the other's work.
        b.save(&[CartItem::from_snapshot(mug(), 1)]);
        assert_eq!(a.items().len(), 1);
    }

    #[test]
    fn test_merge_to_zero_stock_removes_row() {
        let store = store();
        store.add_item(beans(12), 1);
        store.add_item(beans(0), 1);
        assert!(store.is_empty());
    }
}
