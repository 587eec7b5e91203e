// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers: orchestration of the pure core against the storage
//! port and the audit/alert sinks.
//!
//! Side-effect discipline:
//! - Audit events are recorded after the store accepted the change; a
//!   sink failure is logged, never propagated.
//! - Alerts are attempted exactly once per qualifying event, after
//!   insertion; a delivery failure is logged and audited
//!   (`ALERT_DELIVERY_FAILURE`), never propagated.
//! - All order updates go through compare-and-swap on the expected
//!   status; a conflict is returned to the caller, who re-reads and
//!   decides.

use crate::config::EngineConfig;
use crate::error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
use crate::request_response::{
    ConvertQuoteRequest, CreateOrderRequest, CreateOrderResponse, CreateQuoteRequest,
    OrderResponse, QuoteResponse, TransitionAction, TransitionOrderRequest,
};
use betonflow::{
    Command, CreationResult, OrderDraft, apply, create_order as decide_order, draft_from_quote,
    generate_order_id, generate_quote_id,
};
use betonflow_audit::{
    Actor, AlertSink, AuditEvent, AuditEventType, AuditSink,
};
use betonflow_domain::{
    ActorContext, ClientCreditProfile, ClientRef, CreditAssessment, Eta, FormulaRef, Order,
    OrderId, Quote, QuoteId, RotationState, ZoneRef, estimate_eta as project_eta, evaluate_credit,
    rotation_progress as project_rotation,
};
use betonflow_store::{OrderStore, StoreError};
use chrono::{DateTime, Utc};
use serde_json::json;

fn audit_actor(actor: &ActorContext) -> Actor {
    Actor::new(actor.actor_id.clone(), actor.role)
}

/// Records an audit event, logging (never propagating) sink failures.
fn record_audit(audit: &mut dyn AuditSink, event: &AuditEvent) {
    if let Err(err) = audit.record(event) {
        tracing::warn!("audit sink rejected {} event: {err}", event.event_type);
    }
}

/// Creates an order: credit check, approval gate, identifier-collision
/// retry, audit, and best-effort alert fan-out.
///
/// # Errors
///
/// Returns the translated gate/validation failures; on `ClientBlocked`
/// the attempt itself is audited. Alert delivery failures never fail the
/// creation.
pub fn create_order(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    alerts: &mut dyn AlertSink,
    config: &EngineConfig,
    request: CreateOrderRequest,
    actor: &ActorContext,
    profile: &ClientCreditProfile,
) -> Result<CreateOrderResponse, ApiError> {
    let draft = OrderDraft {
        quote_id: None,
        client: ClientRef::new(&request.client),
        formula: FormulaRef::new(&request.formula),
        volume_m3: request.volume_m3,
        price_per_m3: request.price_per_m3,
        zone: ZoneRef::new(&request.zone),
        zone_surcharge: request.zone_surcharge,
        scheduled_delivery: request.scheduled_delivery,
        transport: request.transport,
        justification: request.justification,
    };
    create_from_draft(store, audit, alerts, config, draft, actor, profile)
}

/// Shared creation pipeline for direct creation and quote conversion.
fn create_from_draft(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    alerts: &mut dyn AlertSink,
    config: &EngineConfig,
    draft: OrderDraft,
    actor: &ActorContext,
    profile: &ClientCreditProfile,
) -> Result<CreateOrderResponse, ApiError> {
    let attempted_total = betonflow_domain::compute_total(
        draft.volume_m3,
        draft.price_per_m3,
        draft.zone_surcharge,
    )
    .map_err(translate_domain_error)?;

    let in_window: bool = config
        .emergency_window
        .contains(actor.now)
        .map_err(translate_domain_error)?;

    let assessment: CreditAssessment =
        evaluate_credit(profile, attempted_total, config.default_credit_limit);

    let creation: CreationResult =
        insert_with_fresh_id(store, config, &draft, actor, &assessment, in_window).map_err(
            |err| {
                if let ApiError::ClientBlocked { ref client } = err {
                    // The blocked attempt is itself audit-worthy.
                    record_audit(
                        audit,
                        &AuditEvent::new(
                            AuditEventType::ClientBlockedAttempt,
                            None,
                            audit_actor(actor),
                            actor.now.to_rfc3339(),
                            json!({
                                "client": client,
                                "attempted_total": attempted_total.centimes(),
                            }),
                        ),
                    );
                }
                err
            },
        )?;

    let mut order: Order = creation.order;
    for event in &creation.audit_events {
        record_audit(audit, event);
    }

    // Alert fan-out: exactly one attempt per alert; failures are logged
    // and audited, never propagated.
    let alerts_attempted: usize = creation.alerts.len();
    let mut alerts_delivered: usize = 0;
    let mut technical_alert_delivered: bool = false;
    for alert in &creation.alerts {
        match alerts.deliver(alert) {
            Ok(()) => {
                alerts_delivered += 1;
                if alert.recipient_role == betonflow_domain::Role::ResponsableTechnique {
                    technical_alert_delivered = true;
                }
            }
            Err(err) => {
                tracing::warn!(
                    "alert to {} for order {} failed: {err}",
                    alert.recipient_role,
                    alert.order_id
                );
                record_audit(
                    audit,
                    &AuditEvent::new(
                        AuditEventType::AlertDeliveryFailure,
                        Some(alert.order_id.clone()),
                        audit_actor(actor),
                        actor.now.to_rfc3339(),
                        json!({
                            "recipient_role": alert.recipient_role.as_str(),
                            "severity": alert.severity.as_str(),
                            "reason": err.reason,
                        }),
                    ),
                );
            }
        }
    }

    if technical_alert_delivered {
        // Departure of an emergency order is gated on this flag.
        let expected = order.status;
        order.technical_review_alerted = true;
        if let Err(err) = store.compare_and_update_order(expected, order.clone()) {
            tracing::warn!(
                "could not persist technical-review flag on {}: {err}",
                order.order_id
            );
        }
    }

    Ok(CreateOrderResponse {
        message: format!("Order {} created as {}", order.order_id, order.status),
        credit_warning: creation.credit_warning,
        alerts_attempted,
        alerts_delivered,
        order,
    })
}

/// Runs the pure creation decision, retrying with a fresh identifier
/// when insertion collides.
fn insert_with_fresh_id(
    store: &mut dyn OrderStore,
    config: &EngineConfig,
    draft: &OrderDraft,
    actor: &ActorContext,
    assessment: &CreditAssessment,
    in_window: bool,
) -> Result<CreationResult, ApiError> {
    for _ in 0..config.id_retry_limit {
        let order_id: OrderId = generate_order_id(actor.now);
        let creation: CreationResult =
            decide_order(order_id, draft.clone(), actor, assessment, in_window)
                .map_err(translate_core_error)?;

        match store.insert_order(creation.order.clone()) {
            Ok(()) => return Ok(creation),
            Err(StoreError::IdCollision { .. }) => {}
            Err(err) => return Err(translate_store_error(err)),
        }
    }
    Err(ApiError::Internal {
        message: format!(
            "could not allocate a unique order identifier in {} attempts",
            config.id_retry_limit
        ),
    })
}

/// Transitions an order under the optimistic concurrency discipline.
///
/// # Errors
///
/// Returns `ConcurrentModification` when the expected status is stale,
/// `IntegrityError` when the stored record fails its invariant audit,
/// and the translated core failures otherwise.
pub fn transition_order(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    request: TransitionOrderRequest,
    actor: &ActorContext,
) -> Result<OrderResponse, ApiError> {
    let order_id = OrderId::new(&request.order_id);
    let order: Order = store.get_order(&order_id).map_err(translate_store_error)?;

    // A corrupted record must surface loudly before any further step.
    order.check_integrity().map_err(translate_domain_error)?;

    if order.status != request.expected_status {
        return Err(ApiError::ConcurrentModification {
            message: format!(
                "order {} is {}, caller expected {}",
                order.order_id, order.status, request.expected_status
            ),
        });
    }

    let command: Command = match request.action {
        TransitionAction::ValidatePrice => Command::ValidatePrice,
        TransitionAction::StartProduction => Command::StartProduction,
        TransitionAction::StartLoading => Command::StartLoading,
        TransitionAction::Depart { departed_at } => Command::Depart { departed_at },
        TransitionAction::ConfirmDelivery {
            arrived_at,
            payment_mode,
        } => Command::ConfirmDelivery {
            arrived_at,
            payment_mode,
        },
        TransitionAction::Invoice => Command::Invoice,
        TransitionAction::Cancel { reason } => Command::Cancel { reason },
        TransitionAction::AmendPricing {
            volume_m3,
            price_per_m3,
        } => Command::AmendPricing {
            volume_m3,
            price_per_m3,
        },
    };

    let result = apply(&order, command, actor).map_err(translate_core_error)?;

    store
        .compare_and_update_order(request.expected_status, result.new_order.clone())
        .map_err(translate_store_error)?;
    record_audit(audit, &result.audit_event);

    Ok(OrderResponse {
        message: format!(
            "Order {} is now {}",
            result.new_order.order_id, result.new_order.status
        ),
        order: result.new_order,
    })
}

/// Consumes the inbound quality-control signal for an order.
///
/// # Errors
///
/// Returns the translated store/core failures; re-recording an already
/// recorded check is rejected as a domain-rule violation.
pub fn record_quality_check(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    order_id: &str,
    actor: &ActorContext,
) -> Result<OrderResponse, ApiError> {
    apply_milestone(store, audit, order_id, Command::RecordQualityCheck, actor)
}

/// Records the truck's return to the plant.
///
/// # Errors
///
/// Returns the translated store/core failures; the return must follow a
/// signed delivery and respect milestone monotonicity.
pub fn record_return(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    order_id: &str,
    returned_at: DateTime<Utc>,
    actor: &ActorContext,
) -> Result<OrderResponse, ApiError> {
    apply_milestone(store, audit, order_id, Command::RecordReturn { returned_at }, actor)
}

/// Shared path for the non-transition milestone commands.
fn apply_milestone(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    order_id: &str,
    command: Command,
    actor: &ActorContext,
) -> Result<OrderResponse, ApiError> {
    let order_id = OrderId::new(order_id);
    let order: Order = store.get_order(&order_id).map_err(translate_store_error)?;
    order.check_integrity().map_err(translate_domain_error)?;

    let expected = order.status;
    let result = apply(&order, command, actor).map_err(translate_core_error)?;

    store
        .compare_and_update_order(expected, result.new_order.clone())
        .map_err(translate_store_error)?;
    record_audit(audit, &result.audit_event);

    Ok(OrderResponse {
        message: format!("Order {} updated", result.new_order.order_id),
        order: result.new_order,
    })
}

/// Estimates the arrival of an order's delivery.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown orders. An unknown ETA is a
/// valid estimate, not an error.
pub fn estimate_eta(
    store: &dyn OrderStore,
    config: &EngineConfig,
    order_id: &str,
    now: DateTime<Utc>,
) -> Result<Eta, ApiError> {
    let order: Order = store
        .get_order(&OrderId::new(order_id))
        .map_err(translate_store_error)?;
    Ok(project_eta(&order, now, &config.zones))
}

/// Reports the rotation progress of an order.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown orders.
pub fn rotation_progress(
    store: &dyn OrderStore,
    order_id: &str,
) -> Result<RotationState, ApiError> {
    let order: Order = store
        .get_order(&OrderId::new(order_id))
        .map_err(translate_store_error)?;
    Ok(project_rotation(&order))
}

/// Creates a draft quote.
///
/// # Errors
///
/// Returns the translated role/validation failures.
pub fn create_quote(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    config: &EngineConfig,
    request: CreateQuoteRequest,
    actor: &ActorContext,
) -> Result<QuoteResponse, ApiError> {
    for _ in 0..config.id_retry_limit {
        let quote_id: QuoteId = generate_quote_id(actor.now);
        let result = betonflow::create_quote(
            quote_id,
            ClientRef::new(&request.client),
            FormulaRef::new(&request.formula),
            request.volume_m3,
            request.price_per_m3,
            actor,
        )
        .map_err(translate_core_error)?;

        match store.insert_quote(result.quote.clone()) {
            Ok(()) => {
                record_audit(audit, &result.audit_event);
                return Ok(QuoteResponse {
                    message: format!("Quote {} created", result.quote.quote_id),
                    quote: result.quote,
                });
            }
            Err(StoreError::IdCollision { .. }) => {}
            Err(err) => return Err(translate_store_error(err)),
        }
    }
    Err(ApiError::Internal {
        message: format!(
            "could not allocate a unique quote identifier in {} attempts",
            config.id_retry_limit
        ),
    })
}

/// Submits a draft quote for approval.
///
/// # Errors
///
/// Returns the translated role/transition failures.
pub fn submit_quote(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    quote_id: &str,
    actor: &ActorContext,
) -> Result<QuoteResponse, ApiError> {
    quote_operation(store, audit, quote_id, actor, betonflow::submit_quote)
}

/// Approves a pending quote, freezing its terms.
///
/// # Errors
///
/// Returns the translated role/transition failures.
pub fn approve_quote(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    quote_id: &str,
    actor: &ActorContext,
) -> Result<QuoteResponse, ApiError> {
    quote_operation(store, audit, quote_id, actor, betonflow::approve_quote)
}

/// Rejects a pending quote.
///
/// # Errors
///
/// Returns the translated role/transition failures.
pub fn reject_quote(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    quote_id: &str,
    reason: Option<&str>,
    actor: &ActorContext,
) -> Result<QuoteResponse, ApiError> {
    quote_operation(store, audit, quote_id, actor, |quote, actor| {
        betonflow::reject_quote(quote, reason, actor)
    })
}

/// Shared load / apply / compare-and-swap path for quote operations.
fn quote_operation<F>(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    quote_id: &str,
    actor: &ActorContext,
    operation: F,
) -> Result<QuoteResponse, ApiError>
where
    F: FnOnce(&Quote, &ActorContext) -> Result<betonflow::QuoteResult, betonflow::CoreError>,
{
    let quote: Quote = store
        .get_quote(&QuoteId::new(quote_id))
        .map_err(translate_store_error)?;
    let expected = quote.status;

    let result = operation(&quote, actor).map_err(translate_core_error)?;

    store
        .compare_and_update_quote(expected, result.quote.clone())
        .map_err(translate_store_error)?;
    record_audit(audit, &result.audit_event);

    Ok(QuoteResponse {
        message: format!("Quote {} is now {}", result.quote.quote_id, result.quote.status),
        quote: result.quote,
    })
}

/// Converts an approved quote into an order.
///
/// The quote is consumed first under compare-and-swap (conversion is
/// once-only even under concurrent attempts); the order then goes
/// through the regular creation pipeline, inheriting the quote's price
/// unchanged.
///
/// # Errors
///
/// Returns `ConcurrentModification` when another actor consumed the
/// quote first, plus every failure `create_order` can return.
pub fn convert_quote(
    store: &mut dyn OrderStore,
    audit: &mut dyn AuditSink,
    alerts: &mut dyn AlertSink,
    config: &EngineConfig,
    request: ConvertQuoteRequest,
    actor: &ActorContext,
    profile: &ClientCreditProfile,
) -> Result<CreateOrderResponse, ApiError> {
    let quote: Quote = store
        .get_quote(&QuoteId::new(&request.quote_id))
        .map_err(translate_store_error)?;

    let draft: OrderDraft = draft_from_quote(
        &quote,
        ZoneRef::new(&request.zone),
        request.zone_surcharge,
        request.scheduled_delivery,
        request.transport,
        request.justification,
    );

    // Run the pure creation decision first: if the gate refuses (blocked
    // client, missing justification), the quote must stay approved.
    let in_window: bool = config
        .emergency_window
        .contains(actor.now)
        .map_err(translate_domain_error)?;
    let attempted_total = betonflow_domain::compute_total(
        draft.volume_m3,
        draft.price_per_m3,
        draft.zone_surcharge,
    )
    .map_err(translate_domain_error)?;
    let assessment: CreditAssessment =
        evaluate_credit(profile, attempted_total, config.default_credit_limit);
    betonflow::decide(actor, &draft.client, &assessment, in_window, draft.justification.as_deref())
        .map_err(translate_core_error)?;

    // Consume the quote under compare-and-swap: once-only even under
    // concurrent conversion attempts.
    let expected = quote.status;
    let conversion = betonflow::convert_quote(&quote, actor).map_err(translate_core_error)?;
    store
        .compare_and_update_quote(expected, conversion.quote.clone())
        .map_err(translate_store_error)?;
    record_audit(audit, &conversion.audit_event);

    create_from_draft(store, audit, alerts, config, draft, actor, profile)
}
