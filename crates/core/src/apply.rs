// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::approval::{ApprovalDecision, bypass_alerts, decide};
use crate::command::{Command, OrderDraft};
use crate::error::CoreError;
use crate::state::{CreationResult, TransitionResult};
use betonflow_audit::{Actor, AuditEvent, AuditEventType};
use betonflow_domain::{
    ActorContext, CreditAssessment, Money, Order, OrderId, OrderStatus, compute_total,
    validate_reference,
};
use serde_json::json;

/// Converts an actor context into its audit representation.
fn audit_actor(actor: &ActorContext) -> Actor {
    Actor::new(actor.actor_id.clone(), actor.role)
}

/// Decides and builds a new order from a creation intent.
///
/// This function is pure. It runs the approval gate, computes the total,
/// and returns the order as it must be inserted together with the audit
/// events and the alert fan-out the boundary layer must emit. The caller
/// owns identifier-collision retry and all side effects.
///
/// # Arguments
///
/// * `order_id` - The identifier assigned by the caller
/// * `draft` - The creation intent
/// * `actor` - The acting party
/// * `assessment` - The credit guard's verdict for this attempt
/// * `in_window` - Whether the actor's clock is inside the emergency window
///
/// # Errors
///
/// Returns a validation error for malformed input, or the gate's
/// `ClientBlocked` / `JustificationRequired` / `InsufficientRole`
/// failures. No order exists on any error path.
pub fn create_order(
    order_id: OrderId,
    draft: OrderDraft,
    actor: &ActorContext,
    assessment: &CreditAssessment,
    in_window: bool,
) -> Result<CreationResult, CoreError> {
    validate_reference("client", draft.client.value())?;
    validate_reference("formula", draft.formula.value())?;
    validate_reference("zone", draft.zone.value())?;

    let total: Money = compute_total(draft.volume_m3, draft.price_per_m3, draft.zone_surcharge)?;

    let decision: ApprovalDecision = decide(
        actor,
        &draft.client,
        assessment,
        in_window,
        draft.justification.as_deref(),
    )?;

    let validated_by: Option<String> = decision
        .price_locked
        .then(|| actor.actor_id.clone());
    let emergency_reason: Option<String> = decision
        .emergency
        .then(|| draft.justification.clone().unwrap_or_default());

    let order: Order = Order {
        order_id: order_id.clone(),
        quote_id: draft.quote_id,
        client: draft.client.clone(),
        formula: draft.formula,
        volume_m3: draft.volume_m3,
        price_per_m3: draft.price_per_m3,
        zone: draft.zone,
        zone_surcharge: draft.zone_surcharge,
        total,
        status: decision.status,
        price_locked: decision.price_locked,
        created_by: actor.actor_id.clone(),
        validated_by,
        emergency: decision.emergency,
        emergency_reason,
        scheduled_delivery: draft.scheduled_delivery,
        departure: None,
        arrival: None,
        returned: None,
        payment_mode: None,
        transport: draft.transport,
        quality_checked: false,
        technical_review_alerted: false,
        cancel_reason: None,
        created_at: actor.now,
    };

    let timestamp: String = actor.now.to_rfc3339();
    let mut audit_events: Vec<AuditEvent> = vec![AuditEvent::new(
        AuditEventType::OrderCreated,
        Some(order_id.value().to_owned()),
        audit_actor(actor),
        timestamp.clone(),
        json!({
            "client": order.client.value(),
            "status": order.status.as_str(),
            "price_locked": order.price_locked,
            "emergency": order.emergency,
            "volume_m3": order.volume_m3,
            "price_per_m3": order.price_per_m3,
            "total": order.total.centimes(),
        }),
    )];

    let alerts = if decision.requires_alert {
        let reason: &str = order.emergency_reason.as_deref().unwrap_or("");
        audit_events.push(AuditEvent::new(
            AuditEventType::EmergencyBypassUsed,
            Some(order_id.value().to_owned()),
            audit_actor(actor),
            timestamp,
            json!({
                "reason": reason,
                "window": "night",
                "price_locked": false,
            }),
        ));
        bypass_alerts(&order_id, &order.client, reason)
    } else {
        Vec::new()
    };

    Ok(CreationResult {
        order,
        audit_events,
        alerts,
        credit_warning: assessment.warning.clone(),
    })
}

/// Applies a command to an order, producing the new order and its audit
/// event.
///
/// The function is pure and atomic: every guard is checked before any
/// field of the copy is touched, so a failure leaves the caller's stored
/// record untouched as the system of record.
///
/// # Arguments
///
/// * `order` - The current order (immutable)
/// * `command` - The command to apply
/// * `actor` - The acting party
///
/// # Errors
///
/// Returns `InsufficientRole` when the role table forbids the command,
/// `IllegalTransition` when the target is not the declared successor,
/// and the guard-specific failures documented on each command.
#[allow(clippy::too_many_lines)]
pub fn apply(
    order: &Order,
    command: Command,
    actor: &ActorContext,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::ValidatePrice => {
            authorize(actor.role.can_validate_price(), actor, &command)?;
            check_transition(order, OrderStatus::ReadyForProduction)?;

            let mut new_order: Order = order.clone();
            new_order.status = OrderStatus::ReadyForProduction;
            new_order.price_locked = true;
            new_order.validated_by = Some(actor.actor_id.clone());

            Ok(transitioned(order, new_order, actor, &command))
        }
        Command::StartProduction => {
            authorize(actor.role.can_advance_rotation(), actor, &command)?;
            check_transition(order, OrderStatus::InProduction)?;

            let mut new_order: Order = order.clone();
            new_order.status = OrderStatus::InProduction;

            Ok(transitioned(order, new_order, actor, &command))
        }
        Command::StartLoading => {
            authorize(actor.role.can_advance_rotation(), actor, &command)?;
            check_transition(order, OrderStatus::Loading)?;

            let mut new_order: Order = order.clone();
            new_order.status = OrderStatus::Loading;

            Ok(transitioned(order, new_order, actor, &command))
        }
        Command::Depart { departed_at } => {
            authorize(actor.role.can_advance_rotation(), actor, &command)?;
            check_transition(order, OrderStatus::InDelivery)?;

            // Non-emergency orders may not leave without the recorded
            // quality check; emergency orders instead require the
            // technical-review alert to have actually gone out.
            if order.emergency {
                if !order.technical_review_alerted {
                    return Err(CoreError::TechnicalAlertNotEmitted {
                        order_id: order.order_id.value().to_owned(),
                    });
                }
            } else if !order.quality_checked {
                return Err(CoreError::QualityCheckRequired {
                    order_id: order.order_id.value().to_owned(),
                });
            }

            let mut new_order: Order = order.clone();
            new_order.status = OrderStatus::InDelivery;
            new_order.departure = Some(departed_at);
            new_order.check_milestone_order()?;

            Ok(transitioned(order, new_order, actor, &command))
        }
        Command::ConfirmDelivery {
            arrived_at,
            payment_mode,
        } => {
            authorize(actor.role.can_advance_rotation(), actor, &command)?;
            check_transition(order, OrderStatus::Delivered)?;

            if order.departure.is_none() {
                return Err(CoreError::MissingEvidence {
                    order_id: order.order_id.value().to_owned(),
                    evidence: String::from("departure timestamp"),
                });
            }

            let mut new_order: Order = order.clone();
            new_order.status = OrderStatus::Delivered;
            new_order.arrival = Some(arrived_at);
            new_order.payment_mode = Some(payment_mode);
            new_order.check_milestone_order()?;

            Ok(transitioned(order, new_order, actor, &command))
        }
        Command::Invoice => {
            authorize(actor.role.can_invoice(), actor, &command)?;
            check_transition(order, OrderStatus::Invoiced)?;

            let mut new_order: Order = order.clone();
            new_order.status = OrderStatus::Invoiced;

            Ok(transitioned(order, new_order, actor, &command))
        }
        Command::Cancel { ref reason } => {
            authorize(actor.role.can_cancel(), actor, &command)?;
            check_transition(order, OrderStatus::Cancelled)?;
            if reason.trim().is_empty() {
                return Err(CoreError::MissingEvidence {
                    order_id: order.order_id.value().to_owned(),
                    evidence: String::from("cancellation reason"),
                });
            }

            let mut new_order: Order = order.clone();
            new_order.status = OrderStatus::Cancelled;
            new_order.cancel_reason = Some(reason.clone());

            let audit_event = AuditEvent::new(
                AuditEventType::OrderCancelled,
                Some(order.order_id.value().to_owned()),
                audit_actor(actor),
                actor.now.to_rfc3339(),
                json!({
                    "previous_status": order.status.as_str(),
                    "reason": reason,
                }),
            );
            Ok(TransitionResult {
                new_order,
                audit_event,
            })
        }
        Command::RecordQualityCheck => {
            authorize(actor.role.can_record_quality_check(), actor, &command)?;
            if order.status.is_terminal() {
                return Err(CoreError::OrderImmutable {
                    order_id: order.order_id.value().to_owned(),
                    status: order.status,
                });
            }
            if order.quality_checked {
                return Err(CoreError::MilestoneAlreadyRecorded {
                    order_id: order.order_id.value().to_owned(),
                    milestone: String::from("quality_check"),
                });
            }

            let mut new_order: Order = order.clone();
            new_order.quality_checked = true;

            let audit_event = AuditEvent::new(
                AuditEventType::QualityCheckRecorded,
                Some(order.order_id.value().to_owned()),
                audit_actor(actor),
                actor.now.to_rfc3339(),
                json!({ "status": order.status.as_str() }),
            );
            Ok(TransitionResult {
                new_order,
                audit_event,
            })
        }
        Command::RecordReturn { returned_at } => {
            authorize(actor.role.can_advance_rotation(), actor, &command)?;
            if !order.status.is_signed() {
                return Err(CoreError::MissingEvidence {
                    order_id: order.order_id.value().to_owned(),
                    evidence: String::from("signed delivery before the return milestone"),
                });
            }
            if order.returned.is_some() {
                return Err(CoreError::MilestoneAlreadyRecorded {
                    order_id: order.order_id.value().to_owned(),
                    milestone: String::from("return"),
                });
            }

            let mut new_order: Order = order.clone();
            new_order.returned = Some(returned_at);
            new_order.check_milestone_order()?;

            let audit_event = AuditEvent::new(
                AuditEventType::RotationReturnRecorded,
                Some(order.order_id.value().to_owned()),
                audit_actor(actor),
                actor.now.to_rfc3339(),
                json!({ "returned_at": returned_at.to_rfc3339() }),
            );
            Ok(TransitionResult {
                new_order,
                audit_event,
            })
        }
        Command::AmendPricing {
            volume_m3,
            price_per_m3,
        } => {
            authorize(actor.role.can_create_order(), actor, &command)?;
            if order.price_locked {
                return Err(CoreError::DomainViolation(
                    betonflow_domain::DomainError::PriceLocked {
                        order_id: order.order_id.value().to_owned(),
                    },
                ));
            }
            if order.status != OrderStatus::PendingValidation {
                return Err(CoreError::OrderImmutable {
                    order_id: order.order_id.value().to_owned(),
                    status: order.status,
                });
            }

            let total: Money = compute_total(volume_m3, price_per_m3, order.zone_surcharge)?;

            let mut new_order: Order = order.clone();
            new_order.volume_m3 = volume_m3;
            new_order.price_per_m3 = price_per_m3;
            new_order.total = total;

            let audit_event = AuditEvent::new(
                AuditEventType::OrderRepriced,
                Some(order.order_id.value().to_owned()),
                audit_actor(actor),
                actor.now.to_rfc3339(),
                json!({
                    "volume_m3": volume_m3,
                    "price_per_m3": price_per_m3,
                    "total": total.centimes(),
                }),
            );
            Ok(TransitionResult {
                new_order,
                audit_event,
            })
        }
    }
}

/// Rejects the command when the role table forbids it.
fn authorize(allowed: bool, actor: &ActorContext, command: &Command) -> Result<(), CoreError> {
    if allowed {
        Ok(())
    } else {
        Err(CoreError::InsufficientRole {
            role: actor.role,
            action: command.name().to_owned(),
        })
    }
}

/// Rejects a transition that is not in the status table.
fn check_transition(order: &Order, target: OrderStatus) -> Result<(), CoreError> {
    if order.status.can_transition_to(target) {
        Ok(())
    } else {
        Err(CoreError::IllegalTransition {
            order_id: order.order_id.value().to_owned(),
            from: order.status,
            to: target,
        })
    }
}

/// Builds the standard `ORDER_TRANSITIONED` result.
fn transitioned(
    previous: &Order,
    new_order: Order,
    actor: &ActorContext,
    command: &Command,
) -> TransitionResult {
    let audit_event = AuditEvent::new(
        AuditEventType::OrderTransitioned,
        Some(previous.order_id.value().to_owned()),
        audit_actor(actor),
        actor.now.to_rfc3339(),
        json!({
            "action": command.name(),
            "previous_status": previous.status.as_str(),
            "new_status": new_order.status.as_str(),
        }),
    );
    TransitionResult {
        new_order,
        audit_event,
    }
}
