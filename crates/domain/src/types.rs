// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An amount of money in integer minor units (centimes).
///
/// All currency arithmetic in the engine happens on integer centimes.
/// Rounding to minor units is performed once, inside the pricing
/// calculation, using round-half-up; no floating-point money is stored.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    centimes: i64,
}

impl Money {
    /// Zero currency units.
    pub const ZERO: Self = Self { centimes: 0 };

    /// Creates a `Money` value from integer centimes.
    #[must_use]
    pub const fn from_centimes(centimes: i64) -> Self {
        Self { centimes }
    }

    /// Returns the amount in integer centimes.
    #[must_use]
    pub const fn centimes(&self) -> i64 {
        self.centimes
    }

    /// Adds two amounts, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if the sum does not fit in `i64`.
    pub fn checked_add(self, other: Self) -> Result<Self, DomainError> {
        self.centimes
            .checked_add(other.centimes)
            .map(Self::from_centimes)
            .ok_or_else(|| DomainError::AmountOverflow {
                operation: format!("adding {self} and {other}"),
            })
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.centimes < 0 { "-" } else { "" };
        let abs: i64 = self.centimes.abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// A client reference.
///
/// References are opaque identifiers owned by the external client registry.
/// They are normalized to uppercase for case-insensitive matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientRef {
    value: String,
}

impl ClientRef {
    /// Creates a new `ClientRef`, normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the reference value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ClientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A concrete formula reference (e.g. "B25", "C30-XF1").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormulaRef {
    value: String,
}

impl FormulaRef {
    /// Creates a new `FormulaRef`, normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the reference value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for FormulaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A delivery zone code (e.g. "Z-NORD").
///
/// Zone codes index the travel-time model and carry the delivery surcharge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneRef {
    value: String,
}

impl ZoneRef {
    /// Creates a new `ZoneRef`, normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the zone code.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ZoneRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The globally unique identifier of an order (Bon de Commande).
///
/// Identifiers are generated at creation time from a coarse date component
/// and a random suffix; a collision on insertion is a retryable condition
/// handled at the boundary layer, never a fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId {
    value: String,
}

impl OrderId {
    /// Creates an `OrderId` from an existing identifier value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The identifier of a quote (Devis).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId {
    value: String,
}

impl QuoteId {
    /// Creates a `QuoteId` from an existing identifier value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Payment modes accepted at delivery signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Cash on delivery.
    Cash,
    /// Cheque handed over at signature.
    Cheque,
    /// Bank transfer against invoice.
    BankTransfer,
    /// Delivery on client credit account.
    CreditAccount,
}

impl PaymentMode {
    /// Returns the string representation of this payment mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Cheque => "cheque",
            Self::BankTransfer => "bank_transfer",
            Self::CreditAccount => "credit_account",
        }
    }
}

impl FromStr for PaymentMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "cheque" => Ok(Self::Cheque),
            "bank_transfer" => Ok(Self::BankTransfer),
            "credit_account" => Ok(Self::CreditAccount),
            _ => Err(DomainError::InvalidPaymentMode(s.to_owned())),
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The transport resource assigned to a delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TransportResource {
    /// A plant-owned mixer truck with its driver.
    OwnFleet {
        /// Truck registration or fleet number.
        truck: String,
        /// Driver name or badge.
        driver: String,
    },
    /// A subcontracted carrier.
    Subcontractor {
        /// Subcontractor company name.
        company: String,
    },
}
