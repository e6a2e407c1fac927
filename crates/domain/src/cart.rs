//! Canteen cart ledger.

use common::Money;
use serde::{Deserialize, Serialize};

use crate::types::CartItem;

/// Quantity-tracked list of line items with derived totals.
///
/// Invariant: every item has quantity ≥ 1. A mutation that would leave an
/// item at quantity ≤ 0 removes it instead. Insertion order is preserved so
/// rendered carts stay stable across mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLedger {
    items: Vec<CartItem>,
}

/// Totals derived from the ledger after every mutation.
///
/// `discount` is `floor(subtotal × 0.15)` — the 15% canteen discount with
/// exact floor semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

const DISCOUNT_PERCENT: u64 = 15;

impl CartLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted items, dropping any that violate the
    /// quantity invariant (e.g., hand-edited store files).
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self {
            items: items.into_iter().filter(|item| item.quantity >= 1).collect(),
        }
    }

    /// Returns the line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns true if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity across all line items.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Adds one unit of `name`: increments the quantity if the item exists,
    /// otherwise inserts it at quantity 1.
    pub fn add(&mut self, name: impl Into<String>, price: Money) {
        let name = name.into();
        if let Some(existing) = self.items.iter_mut().find(|item| item.name == name) {
            existing.quantity += 1;
        } else {
            self.items.push(CartItem {
                name,
                price,
                quantity: 1,
            });
        }
    }

    /// Applies a signed quantity delta, removing the item entirely when the
    /// result is ≤ 0. Unknown names are a no-op.
    pub fn change_quantity(&mut self, name: &str, delta: i64) {
        let Some(index) = self.items.iter().position(|item| item.name == name) else {
            return;
        };
        let updated = self.items[index].quantity as i64 + delta;
        if updated <= 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = updated as u32;
        }
    }

    /// Removes the named item unconditionally.
    pub fn remove(&mut self, name: &str) {
        self.items.retain(|item| item.name != name);
    }

    /// Recomputes subtotal, discount, and total from the current items.
    pub fn totals(&self) -> CartTotals {
        let subtotal = self
            .items
            .iter()
            .fold(Money::zero(), |sum, item| sum + item.line_total());
        let discount = subtotal.percent_floor(DISCOUNT_PERCENT);
        CartTotals {
            subtotal,
            discount,
            total: subtotal - discount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_same_item_twice_merges_quantities() {
        let mut cart = CartLedger::new();
        cart.add("X", Money::from_paise(100));
        cart.add("X", Money::from_paise(100));

        assert_eq!(cart.items().len(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.name, "X");
        assert_eq!(item.price.paise(), 100);
        assert_eq!(item.quantity, 2);

        let totals = cart.totals();
        assert_eq!(totals.subtotal.paise(), 200);
        assert_eq!(totals.discount.paise(), 30);
        assert_eq!(totals.total.paise(), 170);
    }

    #[test]
    fn negative_delta_below_one_removes_item() {
        let mut cart = CartLedger::new();
        cart.add("X", Money::from_paise(100));

        cart.change_quantity("X", -2);
        assert!(cart.is_empty());
        assert_eq!(cart.totals().subtotal, Money::zero());
    }

    #[test]
    fn positive_delta_increments() {
        let mut cart = CartLedger::new();
        cart.add("X", Money::from_paise(250));
        cart.change_quantity("X", 3);

        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn delta_on_unknown_item_is_noop() {
        let mut cart = CartLedger::new();
        cart.add("X", Money::from_paise(100));
        cart.change_quantity("Y", -1);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn remove_deletes_only_the_named_item() {
        let mut cart = CartLedger::new();
        cart.add("X", Money::from_paise(100));
        cart.add("Y", Money::from_paise(300));
        cart.remove("X");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].name, "Y");
    }

    #[test]
    fn totals_hold_discount_identity_across_mutations() {
        let mut cart = CartLedger::new();
        cart.add("Rice 5kg", Money::from_paise(39900));
        cart.add("Ghee 1l", Money::from_paise(64900));
        cart.add("Rice 5kg", Money::from_paise(39900));
        cart.change_quantity("Ghee 1l", 2);
        cart.change_quantity("Rice 5kg", -1);
        cart.remove("nonexistent");

        let totals = cart.totals();
        assert_eq!(
            totals.discount,
            totals.subtotal.percent_floor(15),
            "discount must be floor(subtotal * 0.15)"
        );
        assert_eq!(totals.total, totals.subtotal - totals.discount);
        assert!(cart.items().iter().all(|item| item.quantity >= 1));
    }

    #[test]
    fn discount_floors_odd_subtotals() {
        let mut cart = CartLedger::new();
        // Subtotal 199: 15% is 29.85, floored to 29.
        cart.add("Soap", Money::from_paise(199));
        let totals = cart.totals();
        assert_eq!(totals.discount.paise(), 29);
        assert_eq!(totals.total.paise(), 170);
    }

    #[test]
    fn from_items_drops_zero_quantity_entries() {
        let cart = CartLedger::from_items(vec![
            CartItem {
                name: "ok".to_string(),
                price: Money::from_paise(100),
                quantity: 2,
            },
            CartItem {
                name: "stale".to_string(),
                price: Money::from_paise(100),
                quantity: 0,
            },
        ]);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].name, "ok");
    }

    #[test]
    fn ledger_serializes_as_bare_item_array() {
        let mut cart = CartLedger::new();
        cart.add("X", Money::from_paise(100));
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        let back: CartLedger = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }
}
