//! Cart service: the canteen cart persisted through the local store.
//!
//! The cart is purely local; no remote endpoint is involved. Every mutation
//! goes through a single read-modify-write on the store, so the persisted
//! file always reflects the last operation and survives restarts.

use common::Money;
use domain::{CartItem, CartLedger, CartTotals};
use local_store::{LocalStore, keys};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CartService {
    store: LocalStore,
}

impl CartService {
    pub(crate) fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Returns the current line items in insertion order.
    pub async fn items(&self) -> Vec<CartItem> {
        let ledger: CartLedger = self.store.get(keys::CART).await;
        ledger.items().to_vec()
    }

    /// Returns the derived subtotal, discount, and total.
    pub async fn totals(&self) -> CartTotals {
        let ledger: CartLedger = self.store.get(keys::CART).await;
        ledger.totals()
    }

    /// Adds one unit of `name`, merging with an existing line item.
    pub async fn add(&self, name: &str, price: Money) -> Result<CartTotals> {
        let ledger = self
            .store
            .update(keys::CART, |ledger: &mut CartLedger| {
                ledger.add(name, price);
            })
            .await?;
        metrics::counter!("portal_cart_additions_total").increment(1);
        Ok(ledger.totals())
    }

    /// Applies a signed quantity delta; a result ≤ 0 removes the item.
    pub async fn change_quantity(&self, name: &str, delta: i64) -> Result<CartTotals> {
        let ledger = self
            .store
            .update(keys::CART, |ledger: &mut CartLedger| {
                ledger.change_quantity(name, delta);
            })
            .await?;
        Ok(ledger.totals())
    }

    /// Removes the named line item unconditionally.
    pub async fn remove(&self, name: &str) -> Result<CartTotals> {
        let ledger = self
            .store
            .update(keys::CART, |ledger: &mut CartLedger| {
                ledger.remove(name);
            })
            .await?;
        Ok(ledger.totals())
    }

    /// Empties the cart, e.g. after an order is placed.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        self.store.put(keys::CART, &CartLedger::new()).await?;
        metrics::counter!("portal_cart_clears_total").increment(1);
        Ok(())
    }
}
