// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The approval gate and the emergency bypass protocol.
//!
//! Given the actor, the credit check and the clock, the gate decides how
//! an order may come into existence: directly production-ready with a
//! locked price, queued for later validation, or production-ready via the
//! night bypass with an unlocked price, a mandatory justification and a
//! three-party alert fan-out.
//!
//! The decision table is evaluated in order; the first matching rule
//! wins.

use crate::error::CoreError;
use betonflow_audit::{Alert, AlertSeverity};
use betonflow_domain::{
    ActorContext, ClientRef, CreditAssessment, JUSTIFICATION_MIN_LEN, OrderId, OrderStatus, Role,
    validate_justification,
};

/// The gate's decision on how an order comes into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalDecision {
    /// The initial status of the order.
    pub status: OrderStatus,
    /// Whether the price is locked at creation.
    pub price_locked: bool,
    /// Whether the bypass alert fan-out must be attempted before
    /// creation is reported successful.
    pub requires_alert: bool,
    /// Whether the order is an emergency-bypass order.
    pub emergency: bool,
}

/// Decides how an order may be created.
///
/// # Decision table (first match wins)
///
/// 1. Blocked client: fail, no order is created in any mode.
/// 2. Price-authoritative role: `ReadyForProduction`, price locked.
/// 3. Operations director:
///    a. outside the window, or inside it without the bypass capability:
///       `PendingValidation`, price unlocked, queued for an
///       authoritative role;
///    b. inside the window with the capability and an adequate
///       justification: `ReadyForProduction` with the price **not**
///       locked (no authoritative review happened), emergency flagged,
///       alerts required;
///    c. inside the window with the capability but without an adequate
///       justification: fail.
/// 4. Any other role: fail.
///
/// # Arguments
///
/// * `actor` - The acting party
/// * `client` - The client the order is attempted for
/// * `assessment` - The credit guard's verdict for this attempt
/// * `in_window` - Whether the actor's clock is inside the emergency window
/// * `justification` - The bypass justification, if one was supplied
///
/// # Errors
///
/// Returns `ClientBlocked`, `JustificationRequired` or
/// `InsufficientRole` per the table above.
pub fn decide(
    actor: &ActorContext,
    client: &ClientRef,
    assessment: &CreditAssessment,
    in_window: bool,
    justification: Option<&str>,
) -> Result<ApprovalDecision, CoreError> {
    if assessment.blocked {
        return Err(CoreError::ClientBlocked {
            client: client.value().to_owned(),
        });
    }

    if actor.role.is_price_authoritative() {
        return Ok(ApprovalDecision {
            status: OrderStatus::ReadyForProduction,
            price_locked: true,
            requires_alert: false,
            emergency: false,
        });
    }

    if actor.role.is_emergency_eligible() {
        if !in_window || !actor.can_bypass_emergency {
            return Ok(ApprovalDecision {
                status: OrderStatus::PendingValidation,
                price_locked: false,
                requires_alert: false,
                emergency: false,
            });
        }
        let supplied: &str = justification.unwrap_or("");
        if validate_justification(supplied).is_err() {
            return Err(CoreError::JustificationRequired {
                minimum: JUSTIFICATION_MIN_LEN,
            });
        }
        return Ok(ApprovalDecision {
            status: OrderStatus::ReadyForProduction,
            price_locked: false,
            requires_alert: true,
            emergency: true,
        });
    }

    Err(CoreError::InsufficientRole {
        role: actor.role,
        action: String::from("create an order"),
    })
}

/// Builds the mandatory emergency-bypass alert fan-out.
///
/// Exactly three alerts, attempted once each: critical to the CEO,
/// critical to the supervisor, and a warning to the technical manager
/// requesting a formula re-check before the first truck departs.
#[must_use]
pub fn bypass_alerts(order_id: &OrderId, client: &ClientRef, reason: &str) -> Vec<Alert> {
    vec![
        Alert {
            recipient_role: Role::Ceo,
            severity: AlertSeverity::Critical,
            order_id: order_id.value().to_owned(),
            message: format!(
                "Emergency bypass used for client {client}: price validation skipped. Reason: {reason}"
            ),
        },
        Alert {
            recipient_role: Role::Superviseur,
            severity: AlertSeverity::Critical,
            order_id: order_id.value().to_owned(),
            message: format!(
                "Emergency bypass used for client {client}: price validation skipped. Reason: {reason}"
            ),
        },
        Alert {
            recipient_role: Role::ResponsableTechnique,
            severity: AlertSeverity::Warning,
            order_id: order_id.value().to_owned(),
            message: format!(
                "Emergency order for client {client}: re-check the formula before the first \
                 truck departs"
            ),
        },
    ]
}
