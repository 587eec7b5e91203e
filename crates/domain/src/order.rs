// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::order_status::OrderStatus;
use crate::pricing::compute_total;
use crate::types::{ClientRef, FormulaRef, Money, OrderId, PaymentMode, QuoteId, TransportResource, ZoneRef};
use crate::validation::{JUSTIFICATION_MIN_LEN, validate_justification};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A binding commercial order for a concrete delivery (Bon de Commande).
///
/// Orders are created once, move strictly forward through
/// [`OrderStatus`], and become immutable in a terminal status. All
/// mutation goes through the core state machine; this type only carries
/// the record and its read-side invariant checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Globally unique identifier.
    pub order_id: OrderId,
    /// The quote this order was converted from, if any.
    pub quote_id: Option<QuoteId>,
    /// The ordering client.
    pub client: ClientRef,
    /// The concrete formula ordered.
    pub formula: FormulaRef,
    /// Ordered volume in cubic meters.
    pub volume_m3: f64,
    /// Unit price per cubic meter, in major currency units.
    pub price_per_m3: f64,
    /// The delivery zone.
    pub zone: ZoneRef,
    /// Flat delivery surcharge for the zone, captured at creation.
    pub zone_surcharge: Money,
    /// Computed total: volume × unit price + surcharge.
    pub total: Money,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Once true, volume and unit price are immutable.
    pub price_locked: bool,
    /// The actor who created the order.
    pub created_by: String,
    /// The authoritative actor who validated the price, if any. Always
    /// `None` for emergency-bypass orders: the bypass itself is the
    /// authorization and is logged instead.
    pub validated_by: Option<String>,
    /// Whether the order was created through the emergency bypass.
    pub emergency: bool,
    /// Mandatory justification for emergency orders.
    pub emergency_reason: Option<String>,
    /// Scheduled delivery time agreed with the client, if any.
    pub scheduled_delivery: Option<DateTime<Utc>>,
    /// Rotation milestone: truck departed the plant.
    pub departure: Option<DateTime<Utc>>,
    /// Rotation milestone: truck arrived on site.
    pub arrival: Option<DateTime<Utc>>,
    /// Rotation milestone: truck returned to the plant.
    pub returned: Option<DateTime<Utc>>,
    /// Payment mode recorded at delivery signature.
    pub payment_mode: Option<PaymentMode>,
    /// Assigned transport resource.
    pub transport: Option<TransportResource>,
    /// Set when the external quality-control workflow signals its check.
    pub quality_checked: bool,
    /// Set when the emergency technical-review alert was actually
    /// delivered to the technical manager.
    pub technical_review_alerted: bool,
    /// Reason recorded on administrative cancellation.
    pub cancel_reason: Option<String>,
    /// Creation timestamp (UTC).
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Verifies the engine's invariants against this record as read from
    /// the store.
    ///
    /// This is the read-side integrity audit: a stored order that fails
    /// it has been corrupted outside the engine (or by a bug inside it)
    /// and must be surfaced loudly for manual investigation, never
    /// auto-corrected.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IntegrityViolation` naming the first
    /// violated invariant.
    pub fn check_integrity(&self) -> Result<(), DomainError> {
        if self.status == OrderStatus::PendingValidation && self.price_locked {
            return Err(self.integrity_violation("price locked while pending validation"));
        }

        if self.emergency {
            match self.emergency_reason.as_deref() {
                Some(reason) if validate_justification(reason).is_ok() => {}
                _ => {
                    return Err(self.integrity_violation(&format!(
                        "emergency order without a justification of at least \
                         {JUSTIFICATION_MIN_LEN} characters"
                    )));
                }
            }
            if self.validated_by.is_some() {
                return Err(self.integrity_violation(
                    "emergency order carries a price validator; the bypass itself is the \
                     authorization",
                ));
            }
        }

        self.check_milestone_order()?;

        if self.status.is_signed() && self.arrival.is_none() {
            return Err(self.integrity_violation(&format!(
                "status {} without an arrival timestamp",
                self.status
            )));
        }
        if self.status.is_signed() && self.payment_mode.is_none() {
            return Err(self.integrity_violation(&format!(
                "status {} without a payment-mode marker",
                self.status
            )));
        }

        // A locked price must still reproduce the stored total; a mismatch
        // means the historical price was tampered with after locking.
        if self.price_locked {
            let recomputed: Money =
                compute_total(self.volume_m3, self.price_per_m3, self.zone_surcharge)
                    .map_err(|err| self.integrity_violation(&err.to_string()))?;
            if recomputed != self.total {
                return Err(self.integrity_violation(&format!(
                    "locked price does not reproduce the stored total \
                     (stored {}, recomputed {recomputed})",
                    self.total
                )));
            }
        }

        if self.status == OrderStatus::Cancelled && self.cancel_reason.is_none() {
            return Err(self.integrity_violation("cancelled without a recorded reason"));
        }

        Ok(())
    }

    /// Validates milestone monotonicity: departure ≤ arrival ≤ return.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NonMonotonicMilestones` if any recorded pair
    /// is out of order.
    pub fn check_milestone_order(&self) -> Result<(), DomainError> {
        if let (Some(departure), Some(arrival)) = (self.departure, self.arrival)
            && arrival < departure
        {
            return Err(DomainError::NonMonotonicMilestones {
                order_id: self.order_id.value().to_owned(),
                detail: format!("arrival {arrival} precedes departure {departure}"),
            });
        }
        if let (Some(arrival), Some(returned)) = (self.arrival, self.returned)
            && returned < arrival
        {
            return Err(DomainError::NonMonotonicMilestones {
                order_id: self.order_id.value().to_owned(),
                detail: format!("return {returned} precedes arrival {arrival}"),
            });
        }
        if let (Some(departure), Some(returned)) = (self.departure, self.returned)
            && returned < departure
        {
            return Err(DomainError::NonMonotonicMilestones {
                order_id: self.order_id.value().to_owned(),
                detail: format!("return {returned} precedes departure {departure}"),
            });
        }
        Ok(())
    }

    fn integrity_violation(&self, detail: &str) -> DomainError {
        DomainError::IntegrityViolation {
            order_id: self.order_id.value().to_owned(),
            detail: detail.to_owned(),
        }
    }
}
