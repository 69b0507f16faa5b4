//! Order Store

use std::{cmp::Reverse, sync::Arc};

use rust_decimal::Decimal;

use crate::{
    orders::{Order, OrderId, OrderStoreError},
    storage::{Storage, StorageExt, StorageKey},
};

/// Aggregate figures over the order history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    /// Number of orders.
    pub orders: usize,

    /// Number of titles across all orders.
    pub items: usize,

    /// Sum of order totals.
    pub spent: Decimal,
}

/// Pending-order slot plus append-only order history.
///
/// The history is neither deduplicated nor capped.
#[derive(Debug, Clone)]
pub struct OrderStore {
    storage: Arc<dyn Storage>,
}

impl OrderStore {
    /// Create a store over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// The order awaiting payment confirmation, if any. A corrupt slot reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error when the slot cannot be read.
    pub fn pending(&self) -> Result<Option<Order>, OrderStoreError> {
        Ok(self.storage.load_or_default(StorageKey::PendingOrder)?)
    }

    /// Replace the pending order.
    ///
    /// # Errors
    ///
    /// Returns an error when the slot cannot be written.
    pub fn set_pending(&self, order: &Order) -> Result<(), OrderStoreError> {
        Ok(self.storage.save(StorageKey::PendingOrder, order)?)
    }

    /// Remove and return the pending order.
    ///
    /// # Errors
    ///
    /// Returns an error when the slot cannot be read or written.
    pub fn take_pending(&self) -> Result<Option<Order>, OrderStoreError> {
        let pending = self.pending()?;

        if pending.is_some() {
            self.clear_pending()?;
        }

        Ok(pending)
    }

    /// Empty the pending slot.
    ///
    /// # Errors
    ///
    /// Returns an error when the slot cannot be written.
    pub fn clear_pending(&self) -> Result<(), OrderStoreError> {
        Ok(self.storage.remove(StorageKey::PendingOrder)?)
    }

    /// Completed orders, oldest first. A corrupt history reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an error when the history cannot be read.
    pub fn history(&self) -> Result<Vec<Order>, OrderStoreError> {
        Ok(self.storage.load_or_default(StorageKey::OrdersHistory)?)
    }

    /// Completed orders, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error when the history cannot be read.
    pub fn history_newest_first(&self) -> Result<Vec<Order>, OrderStoreError> {
        let mut orders = self.history()?;

        orders.sort_by_key(|order| Reverse(order.date));

        Ok(orders)
    }

    /// Append an order to the history.
    ///
    /// # Errors
    ///
    /// Returns an error when the history cannot be read or written.
    pub fn append(&self, order: Order) -> Result<(), OrderStoreError> {
        let mut orders = self.history()?;

        orders.push(order);

        Ok(self.storage.save(StorageKey::OrdersHistory, &orders)?)
    }

    /// Remove and return the most recently appended order.
    ///
    /// # Errors
    ///
    /// Returns an error when the history cannot be read or written.
    pub fn pop_last(&self) -> Result<Option<Order>, OrderStoreError> {
        let mut orders = self.history()?;

        let Some(last) = orders.pop() else {
            return Ok(None);
        };

        self.storage.save(StorageKey::OrdersHistory, &orders)?;

        Ok(Some(last))
    }

    /// Find an order in the history.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStoreError::NotFound`] when no order has this id.
    pub fn find(&self, id: &OrderId) -> Result<Order, OrderStoreError> {
        self.history()?
            .into_iter()
            .find(|order| &order.id == id)
            .ok_or_else(|| OrderStoreError::NotFound(id.clone()))
    }

    /// Count orders and items, and sum totals, across the history.
    ///
    /// # Errors
    ///
    /// Returns an error when the history cannot be read.
    pub fn summary(&self) -> Result<OrderSummary, OrderStoreError> {
        let orders = self.history()?;

        Ok(OrderSummary {
            orders: orders.len(),
            items: orders.iter().map(|order| order.items.len()).sum(),
            spent: orders.iter().map(|order| order.total).sum(),
        })
    }
}
