// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::quote::QuoteStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Volume is not a positive, finite quantity.
    InvalidVolume(String),
    /// Unit price is negative or not finite.
    InvalidUnitPrice(String),
    /// A currency computation left the representable range.
    AmountOverflow {
        /// Description of the operation that overflowed.
        operation: String,
    },
    /// A reference field is empty or malformed.
    InvalidReference {
        /// The field name.
        field: String,
        /// Description of the validation error.
        message: String,
    },
    /// An emergency justification is missing or too short.
    InvalidJustification {
        /// The supplied justification length (after trimming).
        length: usize,
        /// The minimum acceptable length.
        minimum: usize,
    },
    /// The declared plant timezone is not a valid IANA identifier.
    InvalidTimezone(String),
    /// The emergency window start hour is outside 0-23.
    InvalidWindowHour(u8),
    /// Payment mode string is not recognized.
    InvalidPaymentMode(String),
    /// Role string is not recognized.
    InvalidRole(String),
    /// Order status string is not recognized.
    InvalidOrderStatus(String),
    /// Quote status string is not recognized.
    InvalidQuoteStatus(String),
    /// A quote status transition is not in the transition table.
    IllegalQuoteTransition {
        /// The quote identifier.
        quote_id: String,
        /// The current status.
        from: QuoteStatus,
        /// The requested status.
        to: QuoteStatus,
    },
    /// A quote must be approved before conversion.
    QuoteNotApproved {
        /// The quote identifier.
        quote_id: String,
        /// The quote's current status.
        status: QuoteStatus,
    },
    /// A quote has already been consumed by conversion.
    QuoteAlreadyConverted {
        /// The quote identifier.
        quote_id: String,
    },
    /// A quote's commercial terms are frozen in its current status.
    QuoteImmutable {
        /// The quote identifier.
        quote_id: String,
        /// The quote's current status.
        status: QuoteStatus,
    },
    /// Volume and unit price are frozen once the price is locked.
    PriceLocked {
        /// The order identifier.
        order_id: String,
    },
    /// Delivery milestones must satisfy departure ≤ arrival ≤ return.
    NonMonotonicMilestones {
        /// The order identifier.
        order_id: String,
        /// Description of the violated ordering.
        detail: String,
    },
    /// A persisted order violates an engine invariant on read.
    ///
    /// This is the one condition that must never be silently absorbed:
    /// it is surfaced for manual investigation, never auto-corrected.
    IntegrityViolation {
        /// The order identifier.
        order_id: String,
        /// Description of the violated invariant.
        detail: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidVolume(msg) => write!(f, "Invalid volume: {msg}"),
            Self::InvalidUnitPrice(msg) => write!(f, "Invalid unit price: {msg}"),
            Self::AmountOverflow { operation } => {
                write!(f, "Currency amount overflow while {operation}")
            }
            Self::InvalidReference { field, message } => {
                write!(f, "Invalid {field}: {message}")
            }
            Self::InvalidJustification { length, minimum } => {
                write!(
                    f,
                    "Emergency justification must be at least {minimum} characters, got {length}"
                )
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid timezone: {tz}"),
            Self::InvalidWindowHour(hour) => {
                write!(f, "Emergency window start hour must be 0-23, got {hour}")
            }
            Self::InvalidPaymentMode(s) => write!(f, "Unknown payment mode: {s}"),
            Self::InvalidRole(s) => write!(f, "Unknown role: {s}"),
            Self::InvalidOrderStatus(s) => write!(f, "Unknown order status: {s}"),
            Self::InvalidQuoteStatus(s) => write!(f, "Unknown quote status: {s}"),
            Self::IllegalQuoteTransition { quote_id, from, to } => {
                write!(f, "Quote {quote_id}: illegal transition {from} -> {to}")
            }
            Self::QuoteNotApproved { quote_id, status } => {
                write!(
                    f,
                    "Quote {quote_id} must be approved before conversion, current status is {status}"
                )
            }
            Self::QuoteAlreadyConverted { quote_id } => {
                write!(f, "Quote {quote_id} has already been converted to an order")
            }
            Self::QuoteImmutable { quote_id, status } => {
                write!(
                    f,
                    "Quote {quote_id} cannot be edited in status {status}: commercial terms are frozen"
                )
            }
            Self::PriceLocked { order_id } => {
                write!(
                    f,
                    "Order {order_id}: volume and unit price are immutable once the price is locked"
                )
            }
            Self::NonMonotonicMilestones { order_id, detail } => {
                write!(f, "Order {order_id}: non-monotonic delivery milestones, {detail}")
            }
            Self::IntegrityViolation { order_id, detail } => {
                write!(f, "INTEGRITY VIOLATION on order {order_id}: {detail}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
