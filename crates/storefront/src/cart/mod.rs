//! The cart store: in-memory cart state plus durable persistence.
//!
//! Every mutation rewrites the full snapshot in durable storage before the
//! updated cart is handed back for re-rendering. Mutations serialize behind
//! one async mutex, so each is atomic with respect to other requests.
//! Persistence failures are logged and otherwise ignored; the in-memory cart
//! stays authoritative for the life of the process.

mod storage;

pub use storage::{CART_KEY, CartStorage, FileStorage, MemoryStorage, StorageError};

use std::sync::Arc;

use bodega_core::{Cart, CartTotals, Price, ProductId};
use tokio::sync::Mutex;

/// Cart state service backed by durable key-value storage.
pub struct CartStore {
    cart: Mutex<Cart>,
    storage: Arc<dyn CartStorage>,
}

impl CartStore {
    /// Open the store, reloading the persisted snapshot if one exists.
    ///
    /// A missing snapshot is an empty cart. A snapshot that cannot be read
    /// or parsed is logged and discarded; startup never fails on cart state.
    pub async fn open(storage: Arc<dyn CartStorage>) -> Self {
        let cart = match storage.load(CART_KEY).await {
            Ok(Some(snapshot)) => match serde_json::from_str(&snapshot) {
                Ok(cart) => cart,
                Err(e) => {
                    tracing::warn!("Discarding unparseable cart snapshot: {e}");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!("Failed to load cart snapshot: {e}");
                Cart::new()
            }
        };

        Self {
            cart: Mutex::new(cart),
            storage,
        }
    }

    /// A copy of the current cart.
    pub async fn snapshot(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Add one unit of a product, inserting a new line at quantity 1 if the
    /// product is not in the cart yet.
    pub async fn add(&self, id: ProductId, title: &str, price: Price) -> Cart {
        let mut cart = self.cart.lock().await;
        cart.add(id, title, price);
        self.persist(&cart).await;
        cart.clone()
    }

    /// Remove a line unconditionally.
    pub async fn remove(&self, id: ProductId) -> Cart {
        let mut cart = self.cart.lock().await;
        cart.remove(id);
        self.persist(&cart).await;
        cart.clone()
    }

    /// Increase a line's quantity by one.
    pub async fn increment(&self, id: ProductId) -> Cart {
        let mut cart = self.cart.lock().await;
        cart.increment(id);
        self.persist(&cart).await;
        cart.clone()
    }

    /// Decrease a line's quantity by one, removing the line at quantity 1.
    pub async fn decrement(&self, id: ProductId) -> Cart {
        let mut cart = self.cart.lock().await;
        cart.decrement(id);
        self.persist(&cart).await;
        cart.clone()
    }

    /// Complete a purchase: empty the cart and delete the persisted
    /// snapshot. Returns the totals of the cart as it was purchased.
    pub async fn complete_checkout(&self) -> CartTotals {
        let mut cart = self.cart.lock().await;
        let totals = cart.totals();
        cart.clear();
        if let Err(e) = self.storage.remove(CART_KEY).await {
            tracing::error!("Failed to clear persisted cart: {e}");
        }
        totals
    }

    /// Write the full snapshot to durable storage. Failures are logged and
    /// swallowed.
    async fn persist(&self, cart: &Cart) {
        match serde_json::to_string(cart) {
            Ok(snapshot) => {
                if let Err(e) = self.storage.save(CART_KEY, &snapshot).await {
                    tracing::error!("Failed to persist cart snapshot: {e}");
                }
            }
            Err(e) => tracing::error!("Failed to serialize cart snapshot: {e}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bodega_core::CurrencyCode;

    fn usd(s: &str) -> Price {
        Price::new(s.parse().unwrap(), CurrencyCode::USD)
    }

    #[tokio::test]
    async fn test_mutations_persist_snapshot() {
        let storage = Arc::new(MemoryStorage::default());
        let store = CartStore::open(storage.clone()).await;

        store.add(ProductId::new(1), "Phone", usd("549.99")).await;

        let snapshot = storage.load(CART_KEY).await.unwrap().expect("snapshot written");
        let cart: Cart = serde_json::from_str(&snapshot).unwrap();
        assert_eq!(cart.get(ProductId::new(1)).map(|e| e.quantity), Some(1));
    }

    #[tokio::test]
    async fn test_reopen_restores_identical_cart() {
        let storage: Arc<dyn CartStorage> = Arc::new(MemoryStorage::default());

        let store = CartStore::open(storage.clone()).await;
        store.add(ProductId::new(1), "Phone", usd("549.99")).await;
        store.add(ProductId::new(1), "Phone", usd("549.99")).await;
        store.add(ProductId::new(2), "Rice", usd("2.99")).await;
        let before = store.snapshot().await;

        let reopened = CartStore::open(storage).await;
        assert_eq!(reopened.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_open_with_corrupt_snapshot_starts_empty() {
        let storage = Arc::new(MemoryStorage::default());
        storage.save(CART_KEY, "not json").await.unwrap();

        let store = CartStore::open(storage).await;
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_and_storage() {
        let storage = Arc::new(MemoryStorage::default());
        let store = CartStore::open(storage.clone()).await;

        store.add(ProductId::new(1), "Phone", usd("549.99")).await;
        store.increment(ProductId::new(1)).await;

        let totals = store.complete_checkout().await;
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total, usd("1099.98"));

        assert!(store.snapshot().await.is_empty());
        assert!(storage.load(CART_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_in_memory_cart() {
        struct FailingStorage;

        #[async_trait::async_trait]
        impl CartStorage for FailingStorage {
            async fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }

            async fn save(&self, key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::Io {
                    path: key.into(),
                    source: std::io::Error::other("disk full"),
                })
            }

            async fn remove(&self, _key: &str) -> Result<(), StorageError> {
                Ok(())
            }
        }

        let store = CartStore::open(Arc::new(FailingStorage)).await;
        let cart = store.add(ProductId::new(1), "Phone", usd("549.99")).await;

        assert_eq!(cart.get(ProductId::new(1)).map(|e| e.quantity), Some(1));
    }
}
