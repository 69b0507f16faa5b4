//! Cart
//!
//! In-memory reflection of the persisted cart. Every mutation is written back to storage
//! before registered observers hear about it.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::{
    items::CartItem,
    pricing::total_price,
    storage::{Storage, StorageError, StorageExt, StorageKey},
};

/// Errors raised by cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart could not be read or persisted.
    #[error("cart storage error")]
    Storage(#[from] StorageError),
}

/// Which way a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// The item was absent and has been added.
    Added,

    /// The item was present and has been removed.
    Removed,
}

/// A single persisted change to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// An item was added.
    Added(CartItem),

    /// An item was removed.
    Removed(CartItem),

    /// Every item was removed.
    Cleared,
}

/// Notification published after a change has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
    /// What changed.
    pub change: CartChange,

    /// Number of titles now in the cart.
    pub len: usize,

    /// Cart total after the change.
    pub total: Decimal,
}

/// Receives cart events, e.g. to refresh a counter badge.
pub trait CartObserver: Send + Sync {
    /// Called once per persisted mutation.
    fn on_cart_changed(&self, event: &CartEvent);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent) + Send + Sync,
{
    fn on_cart_changed(&self, event: &CartEvent) {
        self(event);
    }
}

/// Handle returned by [`CartManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Cart Manager
pub struct CartManager {
    storage: Arc<dyn Storage>,
    items: Vec<CartItem>,
    observers: Vec<(SubscriptionId, Arc<dyn CartObserver>)>,
    next_subscription: u64,
}

impl fmt::Debug for CartManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl CartManager {
    /// Load the cart from storage.
    ///
    /// A corrupt persisted cart loads as empty. Duplicate ids left behind by older writers
    /// are collapsed, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the storage backend cannot be read.
    pub fn load(storage: Arc<dyn Storage>) -> Result<Self, CartError> {
        let stored: Vec<CartItem> = storage.load_or_default(StorageKey::Cart)?;

        let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());

        for item in stored {
            if !items.iter().any(|existing| existing.id == item.id) {
                items.push(item);
            }
        }

        Ok(Self {
            storage,
            items,
            observers: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Register an observer for every subsequent persisted change.
    pub fn subscribe(&mut self, observer: Arc<dyn CartObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);

        self.next_subscription += 1;
        self.observers.push((id, observer));

        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();

        self.observers.retain(|(registered, _)| *registered != id);

        self.observers.len() != before
    }

    /// Add an item unless one with the same id is already present.
    ///
    /// Returns `true` when the cart changed.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the new cart cannot be persisted; the cart is left as
    /// it was.
    pub fn add(&mut self, item: CartItem) -> Result<bool, CartError> {
        if self.is_in_cart(item.id) {
            return Ok(false);
        }

        let mut next = self.items.clone();
        next.push(item.clone());

        self.commit(next, CartChange::Added(item))?;

        Ok(true)
    }

    /// Remove the item with the given id, if present.
    ///
    /// Returns `true` when the cart changed.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the new cart cannot be persisted.
    pub fn remove(&mut self, id: u64) -> Result<bool, CartError> {
        let Some(position) = self.items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        let mut next = self.items.clone();
        let removed = next.remove(position);

        self.commit(next, CartChange::Removed(removed))?;

        Ok(true)
    }

    /// Remove the item if present, add it otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the new cart cannot be persisted.
    pub fn toggle(&mut self, item: CartItem) -> Result<Toggled, CartError> {
        if self.is_in_cart(item.id) {
            self.remove(item.id)?;

            Ok(Toggled::Removed)
        } else {
            self.add(item)?;

            Ok(Toggled::Added)
        }
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] when the empty cart cannot be persisted.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new(), CartChange::Cleared)
    }

    /// Check whether an item with this id is in the cart.
    pub fn is_in_cart(&self, id: u64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of titles in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices.
    pub fn subtotal(&self) -> Decimal {
        total_price(&self.items)
    }

    /// Amount due. Equal to the subtotal, as no discounts apply.
    pub fn total(&self) -> Decimal {
        self.subtotal()
    }

    fn commit(&mut self, next: Vec<CartItem>, change: CartChange) -> Result<(), CartError> {
        self.storage.save(StorageKey::Cart, &next)?;
        self.items = next;

        debug!(len = self.items.len(), ?change, "cart persisted");

        let event = CartEvent {
            change,
            len: self.items.len(),
            total: self.total(),
        };

        for (_, observer) in &self.observers {
            observer.on_cart_changed(&event);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal::dec;
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    fn item_a() -> CartItem {
        CartItem::new(1, "A", dec!(10.00))
    }

    fn item_b() -> CartItem {
        CartItem::new(2, "B", dec!(25.50))
    }

    fn empty_cart() -> Result<(Arc<MemoryStorage>, CartManager), CartError> {
        let storage = Arc::new(MemoryStorage::new());
        let cart = CartManager::load(storage.clone())?;

        Ok((storage, cart))
    }

    #[derive(Debug, Default)]
    struct Recorder {
        events: Mutex<Vec<CartEvent>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<CartEvent> {
            self.events.lock().map(|events| events.clone()).unwrap_or_default()
        }
    }

    impl CartObserver for Recorder {
        fn on_cart_changed(&self, event: &CartEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event.clone());
            }
        }
    }

    /// Storage whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStorage(MemoryStorage);

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, key: StorageKey, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io {
                key,
                source: std::io::Error::other("read-only"),
            })
        }

        fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn subtotal_and_total_of_two_items() -> TestResult {
        let (_, mut cart) = empty_cart()?;

        cart.add(item_a())?;
        cart.add(item_b())?;

        assert_eq!(cart.subtotal(), dec!(35.50));
        assert_eq!(cart.total(), dec!(35.50));

        Ok(())
    }

    #[test]
    fn add_is_idempotent() -> TestResult {
        let (_, mut cart) = empty_cart()?;

        assert!(cart.add(item_a())?);
        assert!(!cart.add(CartItem::new(1, "A (renamed)", dec!(99)))?);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items().first().map(|item| item.name.as_str()), Some("A"));

        Ok(())
    }

    #[test]
    fn remove_missing_item_is_a_no_op() -> TestResult {
        let (_, mut cart) = empty_cart()?;

        cart.add(item_a())?;

        assert!(!cart.remove(42)?);
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn toggle_twice_restores_membership_and_persisted_form() -> TestResult {
        let (storage, mut cart) = empty_cart()?;

        cart.add(item_a())?;
        let before = storage.get(StorageKey::Cart)?;

        assert_eq!(cart.toggle(item_b())?, Toggled::Added);
        assert!(cart.is_in_cart(2));

        assert_eq!(cart.toggle(item_b())?, Toggled::Removed);
        assert!(!cart.is_in_cart(2));

        assert_eq!(storage.get(StorageKey::Cart)?, before);

        Ok(())
    }

    #[test]
    fn clear_empties_the_cart() -> TestResult {
        let (storage, mut cart) = empty_cart()?;

        cart.add(item_a())?;
        cart.add(item_b())?;
        cart.clear()?;

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(storage.get(StorageKey::Cart)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn mutations_survive_reload() -> TestResult {
        let (storage, mut cart) = empty_cart()?;

        cart.add(item_a())?;
        cart.add(item_b())?;
        cart.remove(1)?;

        let reloaded = CartManager::load(storage)?;

        assert_eq!(reloaded.items(), &[item_b()]);

        Ok(())
    }

    #[test]
    fn corrupt_cart_loads_empty() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(StorageKey::Cart, "[{\"id\": 1, \"name\"")?;

        let cart = CartManager::load(storage)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_persisted_ids_are_collapsed() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        storage.save(StorageKey::Cart, &[item_a(), item_b(), item_a()])?;

        let cart = CartManager::load(storage)?;

        assert_eq!(cart.len(), 2);

        Ok(())
    }

    #[test]
    fn observers_see_each_persisted_change() -> TestResult {
        let (storage, mut cart) = empty_cart()?;
        let recorder = Arc::new(Recorder::default());

        cart.subscribe(recorder.clone());

        cart.add(item_a())?;
        cart.add(item_a())?;
        cart.toggle(item_b())?;
        cart.clear()?;

        let events = recorder.events();

        assert_eq!(
            events.iter().map(|event| &event.change).collect::<Vec<_>>(),
            [
                &CartChange::Added(item_a()),
                &CartChange::Added(item_b()),
                &CartChange::Cleared,
            ]
        );
        assert_eq!(events.get(1).map(|event| event.total), Some(dec!(35.50)));
        assert_eq!(storage.get(StorageKey::Cart)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn observer_runs_after_the_write() -> TestResult {
        let storage = Arc::new(MemoryStorage::new());
        let mut cart = CartManager::load(storage.clone())?;
        let seen = Arc::new(Mutex::new(None));

        let observed_storage = storage.clone();
        let observed = seen.clone();

        cart.subscribe(Arc::new(move |_event: &CartEvent| {
            let persisted: Option<Vec<CartItem>> =
                observed_storage.load(StorageKey::Cart).ok().flatten();

            if let Ok(mut slot) = observed.lock() {
                *slot = persisted;
            }
        }));

        cart.add(item_a())?;

        let persisted = seen.lock().map(|slot| slot.clone()).unwrap_or_default();

        assert_eq!(persisted, Some(vec![item_a()]));

        Ok(())
    }

    #[test]
    fn unsubscribed_observers_are_not_called() -> TestResult {
        let (_, mut cart) = empty_cart()?;
        let recorder = Arc::new(Recorder::default());

        let id = cart.subscribe(recorder.clone());

        assert!(cart.unsubscribe(id));
        assert!(!cart.unsubscribe(id));

        cart.add(item_a())?;

        assert!(recorder.events().is_empty());

        Ok(())
    }

    #[test]
    fn failed_write_leaves_cart_and_observers_untouched() -> TestResult {
        let storage = Arc::new(ReadOnlyStorage::default());
        let mut cart = CartManager::load(storage)?;
        let recorder = Arc::new(Recorder::default());

        cart.subscribe(recorder.clone());

        let result = cart.add(item_a());

        assert!(
            matches!(result, Err(CartError::Storage(StorageError::Io { .. }))),
            "expected storage error, got {result:?}"
        );
        assert!(cart.is_empty());
        assert!(recorder.events().is_empty());

        Ok(())
    }
}
