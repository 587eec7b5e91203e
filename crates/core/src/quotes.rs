// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quote (Devis) operations.
//!
//! A quote is drafted by a commercial role, approved by a
//! price-authoritative role, and consumed exactly once by conversion
//! into an order draft that inherits its price unchanged.

use crate::command::OrderDraft;
use crate::error::CoreError;
use crate::state::QuoteResult;
use betonflow_audit::{Actor, AuditEvent, AuditEventType};
use betonflow_domain::{
    ActorContext, ClientRef, FormulaRef, Money, Quote, QuoteId, QuoteStatus, TransportResource,
    ZoneRef, validate_reference,
};
use chrono::{DateTime, Utc};
use serde_json::json;

fn audit_actor(actor: &ActorContext) -> Actor {
    Actor::new(actor.actor_id.clone(), actor.role)
}

/// Creates a new draft quote.
///
/// # Errors
///
/// Returns `InsufficientRole` for roles outside the commercial chain,
/// or a validation error for malformed terms.
pub fn create_quote(
    quote_id: QuoteId,
    client: ClientRef,
    formula: FormulaRef,
    volume_m3: f64,
    price_per_m3: f64,
    actor: &ActorContext,
) -> Result<QuoteResult, CoreError> {
    if !actor.role.can_create_quote() {
        return Err(CoreError::InsufficientRole {
            role: actor.role,
            action: String::from("create a quote"),
        });
    }
    validate_reference("client", client.value())?;
    validate_reference("formula", formula.value())?;

    let quote: Quote = Quote::new(
        quote_id.clone(),
        client,
        formula,
        volume_m3,
        price_per_m3,
        actor.actor_id.clone(),
    )?;

    let audit_event = AuditEvent::new(
        AuditEventType::QuoteCreated,
        None,
        audit_actor(actor),
        actor.now.to_rfc3339(),
        json!({
            "quote_id": quote_id.value(),
            "client": quote.client.value(),
            "volume_m3": quote.volume_m3,
            "price_per_m3": quote.price_per_m3,
            "total": quote.total.centimes(),
        }),
    );
    Ok(QuoteResult { quote, audit_event })
}

/// Submits a draft quote for approval.
///
/// # Errors
///
/// Returns `InsufficientRole` or an illegal-transition domain error.
pub fn submit_quote(quote: &Quote, actor: &ActorContext) -> Result<QuoteResult, CoreError> {
    if !actor.role.can_create_quote() {
        return Err(CoreError::InsufficientRole {
            role: actor.role,
            action: String::from("submit a quote"),
        });
    }
    let mut new_quote: Quote = quote.clone();
    new_quote.transition_to(QuoteStatus::PendingApproval)?;

    Ok(quote_event(
        new_quote,
        AuditEventType::QuoteSubmitted,
        actor,
        json!({ "quote_id": quote.quote_id.value(), "previous_status": quote.status.as_str() }),
    ))
}

/// Approves a pending quote, freezing its terms.
///
/// # Errors
///
/// Returns `InsufficientRole` for non-authoritative roles, or an
/// illegal-transition domain error.
pub fn approve_quote(quote: &Quote, actor: &ActorContext) -> Result<QuoteResult, CoreError> {
    if !actor.role.can_approve_quote() {
        return Err(CoreError::InsufficientRole {
            role: actor.role,
            action: String::from("approve a quote"),
        });
    }
    let mut new_quote: Quote = quote.clone();
    new_quote.transition_to(QuoteStatus::Approved)?;

    Ok(quote_event(
        new_quote,
        AuditEventType::QuoteApproved,
        actor,
        json!({ "quote_id": quote.quote_id.value(), "total": quote.total.centimes() }),
    ))
}

/// Rejects a pending quote.
///
/// # Errors
///
/// Returns `InsufficientRole` for non-authoritative roles, or an
/// illegal-transition domain error.
pub fn reject_quote(
    quote: &Quote,
    reason: Option<&str>,
    actor: &ActorContext,
) -> Result<QuoteResult, CoreError> {
    if !actor.role.can_approve_quote() {
        return Err(CoreError::InsufficientRole {
            role: actor.role,
            action: String::from("reject a quote"),
        });
    }
    let mut new_quote: Quote = quote.clone();
    new_quote.transition_to(QuoteStatus::Rejected)?;

    Ok(quote_event(
        new_quote,
        AuditEventType::QuoteRejected,
        actor,
        json!({ "quote_id": quote.quote_id.value(), "reason": reason }),
    ))
}

/// Consumes an approved quote, marking it converted.
///
/// The caller follows up with [`draft_from_quote`] and the regular
/// order-creation path; the order inherits the quote's price unchanged.
///
/// # Errors
///
/// Returns `InsufficientRole`, `QuoteNotApproved`, or
/// `QuoteAlreadyConverted` (conversion is once-only).
pub fn convert_quote(quote: &Quote, actor: &ActorContext) -> Result<QuoteResult, CoreError> {
    if !actor.role.can_create_order() {
        return Err(CoreError::InsufficientRole {
            role: actor.role,
            action: String::from("convert a quote into an order"),
        });
    }
    let mut new_quote: Quote = quote.clone();
    new_quote.mark_converted()?;

    Ok(quote_event(
        new_quote,
        AuditEventType::QuoteConverted,
        actor,
        json!({ "quote_id": quote.quote_id.value(), "total": quote.total.centimes() }),
    ))
}

/// Builds an order draft from a converted quote.
///
/// Volume, unit price, client and formula are inherited unchanged;
/// delivery-specific fields are supplied at conversion time.
#[must_use]
pub fn draft_from_quote(
    quote: &Quote,
    zone: ZoneRef,
    zone_surcharge: Money,
    scheduled_delivery: Option<DateTime<Utc>>,
    transport: Option<TransportResource>,
    justification: Option<String>,
) -> OrderDraft {
    OrderDraft {
        quote_id: Some(quote.quote_id.clone()),
        client: quote.client.clone(),
        formula: quote.formula.clone(),
        volume_m3: quote.volume_m3,
        price_per_m3: quote.price_per_m3,
        zone,
        zone_surcharge,
        scheduled_delivery,
        transport,
        justification,
    }
}

fn quote_event(
    quote: Quote,
    event_type: AuditEventType,
    actor: &ActorContext,
    payload: serde_json::Value,
) -> QuoteResult {
    let audit_event = AuditEvent::new(
        event_type,
        None,
        audit_actor(actor),
        actor.now.to_rfc3339(),
        payload,
    );
    QuoteResult { quote, audit_event }
}
