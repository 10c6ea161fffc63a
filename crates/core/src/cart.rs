//! The shopping cart mapping and its derived totals.
//!
//! A [`Cart`] is a pure value: mutations are plain method calls and
//! persistence is someone else's job (the storefront crate serializes the
//! whole cart after every mutation). Entries are keyed by [`ProductId`] in a
//! `BTreeMap` so rendering order is stable across snapshots.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CurrencyCode, Price, ProductId};

/// One line of the cart: what the shopper picked and how many.
///
/// Invariant: `quantity >= 1`. A decrement that would reach zero removes the
/// entry from the cart instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub title: String,
    pub price: Price,
    pub quantity: u32,
}

/// Derived checkout summary. Never stored, always recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    /// Total number of items across all lines.
    pub item_count: u32,
    /// Sum of price x quantity over all lines.
    pub total: Price,
}

/// The shopping cart: a mapping of product id to entry.
///
/// Serializes transparently as a JSON object keyed by product id, which is
/// the snapshot format written to durable storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<ProductId, CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity is incremented;
    /// otherwise a new entry is inserted with quantity 1.
    pub fn add(&mut self, id: ProductId, title: &str, price: Price) {
        self.entries
            .entry(id)
            .and_modify(|entry| entry.quantity += 1)
            .or_insert_with(|| CartEntry {
                title: title.to_string(),
                price,
                quantity: 1,
            });
    }

    /// Remove a line unconditionally, returning it if it was present.
    pub fn remove(&mut self, id: ProductId) -> Option<CartEntry> {
        self.entries.remove(&id)
    }

    /// Increase the quantity of an existing line by one.
    ///
    /// Unknown ids are ignored.
    pub fn increment(&mut self, id: ProductId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.quantity += 1;
        }
    }

    /// Decrease the quantity of an existing line by one.
    ///
    /// At quantity 1 the line is removed entirely. Unknown ids are ignored.
    pub fn decrement(&mut self, id: ProductId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            if entry.quantity > 1 {
                entry.quantity -= 1;
            } else {
                self.entries.remove(&id);
            }
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.get(&id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct lines (not total items).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate lines in stable id order.
    pub fn entries(&self) -> impl Iterator<Item = (ProductId, &CartEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Compute the checkout summary: total item count and total price.
    ///
    /// The currency is taken from the first line; an empty cart totals zero
    /// in the default currency.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let currency_code = self
            .entries
            .values()
            .map(|entry| entry.price.currency_code)
            .next()
            .unwrap_or_default();

        let mut item_count: u32 = 0;
        let mut total = Decimal::ZERO;
        for entry in self.entries.values() {
            item_count += entry.quantity;
            total += entry.price.amount * Decimal::from(entry.quantity);
        }

        CartTotals {
            item_count,
            total: Price::new(total, currency_code),
        }
    }
}
