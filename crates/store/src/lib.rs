// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! The storage port of the dispatch engine.
//!
//! The backing store is an external collaborator; this crate only defines
//! the interface the engine requires of it, plus an in-memory reference
//! backend used by tests and by embedders that bring no database.
//!
//! ## Concurrency discipline
//!
//! Updates are optimistic compare-and-swap on `(identifier, expected
//! status)`. A store implementation must reject an update whose expected
//! status no longer matches the stored record, so that two dispatchers
//! can never silently overwrite each other's transition. Identifier
//! collisions on insert are reported as a distinct, retryable error.

mod error;

pub use error::StoreError;

use betonflow_domain::{Order, OrderId, OrderStatus, Quote, QuoteId, QuoteStatus};
use std::collections::HashMap;

/// The store interface required by the dispatch engine.
pub trait OrderStore {
    /// Inserts a new order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IdCollision` if an order with the same
    /// identifier already exists.
    fn insert_order(&mut self, order: Order) -> Result<(), StoreError>;

    /// Fetches an order by identifier.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OrderNotFound` if no such order exists.
    fn get_order(&self, order_id: &OrderId) -> Result<Order, StoreError>;

    /// Replaces an order iff its stored status matches `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::VersionConflict` if the stored status has
    /// already changed, `StoreError::OrderNotFound` if the order does not
    /// exist.
    fn compare_and_update_order(
        &mut self,
        expected_status: OrderStatus,
        order: Order,
    ) -> Result<(), StoreError>;

    /// Inserts a new quote.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::IdCollision` if a quote with the same
    /// identifier already exists.
    fn insert_quote(&mut self, quote: Quote) -> Result<(), StoreError>;

    /// Fetches a quote by identifier.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::QuoteNotFound` if no such quote exists.
    fn get_quote(&self, quote_id: &QuoteId) -> Result<Quote, StoreError>;

    /// Replaces a quote iff its stored status matches `expected_status`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::VersionConflict` if the stored status has
    /// already changed, `StoreError::QuoteNotFound` if the quote does not
    /// exist.
    fn compare_and_update_quote(
        &mut self,
        expected_status: QuoteStatus,
        quote: Quote,
    ) -> Result<(), StoreError>;
}

/// An in-memory store backend.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: HashMap<String, Order>,
    quotes: HashMap<String, Quote>,
}

impl InMemoryOrderStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert_order(&mut self, order: Order) -> Result<(), StoreError> {
        let key: String = order.order_id.value().to_owned();
        if self.orders.contains_key(&key) {
            return Err(StoreError::IdCollision { id: key });
        }
        self.orders.insert(key, order);
        Ok(())
    }

    fn get_order(&self, order_id: &OrderId) -> Result<Order, StoreError> {
        self.orders
            .get(order_id.value())
            .cloned()
            .ok_or_else(|| StoreError::OrderNotFound {
                order_id: order_id.value().to_owned(),
            })
    }

    fn compare_and_update_order(
        &mut self,
        expected_status: OrderStatus,
        order: Order,
    ) -> Result<(), StoreError> {
        let key: String = order.order_id.value().to_owned();
        let stored: &mut Order =
            self.orders
                .get_mut(&key)
                .ok_or_else(|| StoreError::OrderNotFound {
                    order_id: key.clone(),
                })?;
        if stored.status != expected_status {
            return Err(StoreError::VersionConflict {
                id: key,
                expected: expected_status.to_string(),
                actual: stored.status.to_string(),
            });
        }
        *stored = order;
        Ok(())
    }

    fn insert_quote(&mut self, quote: Quote) -> Result<(), StoreError> {
        let key: String = quote.quote_id.value().to_owned();
        if self.quotes.contains_key(&key) {
            return Err(StoreError::IdCollision { id: key });
        }
        self.quotes.insert(key, quote);
        Ok(())
    }

    fn get_quote(&self, quote_id: &QuoteId) -> Result<Quote, StoreError> {
        self.quotes
            .get(quote_id.value())
            .cloned()
            .ok_or_else(|| StoreError::QuoteNotFound {
                quote_id: quote_id.value().to_owned(),
            })
    }

    fn compare_and_update_quote(
        &mut self,
        expected_status: QuoteStatus,
        quote: Quote,
    ) -> Result<(), StoreError> {
        let key: String = quote.quote_id.value().to_owned();
        let stored: &mut Quote =
            self.quotes
                .get_mut(&key)
                .ok_or_else(|| StoreError::QuoteNotFound {
                    quote_id: key.clone(),
                })?;
        if stored.status != expected_status {
            return Err(StoreError::VersionConflict {
                id: key,
                expected: expected_status.to_string(),
                actual: stored.status.to_string(),
            });
        }
        *stored = quote;
        Ok(())
    }
}
