// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An insert hit an identifier that already exists.
    ///
    /// Retryable: the caller regenerates the identifier and retries the
    /// insertion.
    IdCollision {
        /// The colliding identifier.
        id: String,
    },
    /// The stored status no longer matches the expected status.
    ///
    /// Another actor advanced the record first; the caller re-reads the
    /// current state and decides whether to retry.
    VersionConflict {
        /// The record identifier.
        id: String,
        /// The status the caller expected.
        expected: String,
        /// The status actually stored.
        actual: String,
    },
    /// The requested order was not found.
    OrderNotFound {
        /// The order identifier.
        order_id: String,
    },
    /// The requested quote was not found.
    QuoteNotFound {
        /// The quote identifier.
        quote_id: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdCollision { id } => write!(f, "Identifier '{id}' already exists"),
            Self::VersionConflict {
                id,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Record '{id}' changed concurrently: expected status '{expected}', found '{actual}'"
                )
            }
            Self::OrderNotFound { order_id } => write!(f, "Order '{order_id}' not found"),
            Self::QuoteNotFound { quote_id } => write!(f, "Quote '{quote_id}' not found"),
        }
    }
}

impl std::error::Error for StoreError {}
