// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::pricing::compute_total;
use crate::types::{ClientRef, FormulaRef, Money, QuoteId};
use crate::validation::{validate_unit_price, validate_volume};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle status of a quote (Devis).
///
/// Once `Approved`, the quote's commercial terms are frozen; the only
/// remaining edges are conversion into an order (exactly once) or nothing.
/// There is no `Approved` → `Draft` edge: reverting an approved quote is
/// an administrative override outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Being drafted by a commercial role. Full editing allowed.
    #[default]
    Draft,
    /// Submitted for approval by an authoritative role.
    PendingApproval,
    /// Approved: terms frozen, ready for one conversion.
    Approved,
    /// Consumed by conversion into an order. Terminal.
    Converted,
    /// Rejected by an authoritative role. Terminal.
    Rejected,
}

impl QuoteStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Converted => "converted",
            Self::Rejected => "rejected",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `Draft` → `PendingApproval`
    /// - `PendingApproval` → `Approved`
    /// - `PendingApproval` → `Rejected`
    /// - `Approved` → `Converted`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::PendingApproval)
                | (Self::PendingApproval, Self::Approved)
                | (Self::PendingApproval, Self::Rejected)
                | (Self::Approved, Self::Converted)
        )
    }

    /// Returns whether the quote's commercial terms are frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        matches!(self, Self::Approved | Self::Converted | Self::Rejected)
    }
}

impl FromStr for QuoteStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "converted" => Ok(Self::Converted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidQuoteStatus(s.to_owned())),
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A priced proposal preceding a binding order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// The quote identifier.
    pub quote_id: QuoteId,
    /// The client this quote is addressed to.
    pub client: ClientRef,
    /// The concrete formula quoted.
    pub formula: FormulaRef,
    /// Quoted volume in cubic meters.
    pub volume_m3: f64,
    /// Quoted unit price per cubic meter.
    pub price_per_m3: f64,
    /// Computed total (no zone surcharge at quote stage).
    pub total: Money,
    /// The quote's lifecycle status.
    pub status: QuoteStatus,
    /// Set when an authoritative role approves the quote; freezes terms.
    pub price_locked: bool,
    /// The actor who created the quote.
    pub created_by: String,
}

impl Quote {
    /// Creates a new draft quote with a computed total.
    ///
    /// # Arguments
    ///
    /// * `quote_id` - The quote identifier
    /// * `client` - The client reference
    /// * `formula` - The concrete formula
    /// * `volume_m3` - Quoted volume (must be strictly positive)
    /// * `price_per_m3` - Quoted unit price (must not be negative)
    /// * `created_by` - The creating actor's identifier
    ///
    /// # Errors
    ///
    /// Returns an error if volume or price fail validation.
    pub fn new(
        quote_id: QuoteId,
        client: ClientRef,
        formula: FormulaRef,
        volume_m3: f64,
        price_per_m3: f64,
        created_by: String,
    ) -> Result<Self, DomainError> {
        let total: Money = compute_total(volume_m3, price_per_m3, Money::ZERO)?;
        Ok(Self {
            quote_id,
            client,
            formula,
            volume_m3,
            price_per_m3,
            total,
            status: QuoteStatus::Draft,
            price_locked: false,
            created_by,
        })
    }

    /// Re-prices a draft quote.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuoteImmutable` if the quote's terms are
    /// frozen (approved, converted or rejected), or a validation error if
    /// the new terms are invalid.
    pub fn set_pricing(&mut self, volume_m3: f64, price_per_m3: f64) -> Result<(), DomainError> {
        if self.price_locked || self.status.is_frozen() {
            return Err(DomainError::QuoteImmutable {
                quote_id: self.quote_id.value().to_owned(),
                status: self.status,
            });
        }
        validate_volume(volume_m3)?;
        validate_unit_price(price_per_m3)?;
        self.total = compute_total(volume_m3, price_per_m3, Money::ZERO)?;
        self.volume_m3 = volume_m3;
        self.price_per_m3 = price_per_m3;
        Ok(())
    }

    /// Moves the quote to a new status, enforcing the transition table.
    ///
    /// Approval freezes the quote's terms (`price_locked = true`).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IllegalQuoteTransition` if the edge is not in
    /// the table.
    pub fn transition_to(&mut self, target: QuoteStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(target) {
            // Converted quotes get the more specific error: consumption is
            // once-only.
            if self.status == QuoteStatus::Converted {
                return Err(DomainError::QuoteAlreadyConverted {
                    quote_id: self.quote_id.value().to_owned(),
                });
            }
            return Err(DomainError::IllegalQuoteTransition {
                quote_id: self.quote_id.value().to_owned(),
                from: self.status,
                to: target,
            });
        }
        if target == QuoteStatus::Approved {
            self.price_locked = true;
        }
        self.status = target;
        Ok(())
    }

    /// Marks the quote as consumed by conversion into an order.
    ///
    /// Conversion is once-only and requires `Approved` status; the order
    /// created from this quote inherits its price unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuoteAlreadyConverted` if already consumed,
    /// or `DomainError::QuoteNotApproved` for any other non-approved
    /// status.
    pub fn mark_converted(&mut self) -> Result<(), DomainError> {
        match self.status {
            QuoteStatus::Approved => {
                self.status = QuoteStatus::Converted;
                Ok(())
            }
            QuoteStatus::Converted => Err(DomainError::QuoteAlreadyConverted {
                quote_id: self.quote_id.value().to_owned(),
            }),
            status => Err(DomainError::QuoteNotApproved {
                quote_id: self.quote_id.value().to_owned(),
                status,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft_quote() -> Quote {
        Quote::new(
            QuoteId::new("QT-20260101-000001"),
            ClientRef::new("CL-001"),
            FormulaRef::new("B25"),
            8.0,
            850.0,
            String::from("commercial-1"),
        )
        .unwrap()
    }

    #[test]
    fn test_new_quote_computes_total() {
        let quote = draft_quote();
        assert_eq!(quote.total, Money::from_centimes(680_000));
        assert_eq!(quote.status, QuoteStatus::Draft);
        assert!(!quote.price_locked);
    }

    #[test]
    fn test_approval_freezes_terms() {
        let mut quote = draft_quote();
        quote.transition_to(QuoteStatus::PendingApproval).unwrap();
        quote.transition_to(QuoteStatus::Approved).unwrap();

        assert!(quote.price_locked);
        let err = quote.set_pricing(10.0, 900.0).unwrap_err();
        assert!(matches!(err, DomainError::QuoteImmutable { .. }));
    }

    #[test]
    fn test_conversion_requires_approval() {
        let mut quote = draft_quote();
        let err = quote.mark_converted().unwrap_err();
        assert!(matches!(err, DomainError::QuoteNotApproved { .. }));
    }

    #[test]
    fn test_conversion_is_once_only() {
        let mut quote = draft_quote();
        quote.transition_to(QuoteStatus::PendingApproval).unwrap();
        quote.transition_to(QuoteStatus::Approved).unwrap();
        quote.mark_converted().unwrap();

        let err = quote.mark_converted().unwrap_err();
        assert!(matches!(err, DomainError::QuoteAlreadyConverted { .. }));
    }

    #[test]
    fn test_no_edge_from_approved_back_to_draft() {
        assert!(!QuoteStatus::Approved.can_transition_to(QuoteStatus::Draft));
        assert!(!QuoteStatus::Approved.can_transition_to(QuoteStatus::PendingApproval));
    }

    #[test]
    fn test_rejection_only_from_pending_approval() {
        assert!(QuoteStatus::PendingApproval.can_transition_to(QuoteStatus::Rejected));
        assert!(!QuoteStatus::Draft.can_transition_to(QuoteStatus::Rejected));
        assert!(!QuoteStatus::Approved.can_transition_to(QuoteStatus::Rejected));
    }
}
