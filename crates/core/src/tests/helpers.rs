// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for core tests.

use crate::{Command, CoreError, OrderDraft, TransitionResult, apply, create_order};
use betonflow_domain::{
    ActorContext, ClientRef, CreditAssessment, FormulaRef, Money, Order, OrderId, PaymentMode,
    Role, ZoneRef,
};
use chrono::{DateTime, TimeZone, Utc};

/// 14:00 UTC: outside the default emergency window.
pub fn afternoon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap()
}

/// 21:00 UTC: inside the default emergency window.
pub fn night() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 21, 0, 0).unwrap()
}

pub fn actor_at(role: Role, now: DateTime<Utc>) -> ActorContext {
    ActorContext::new(format!("{role}-1"), role, false, now)
}

pub fn actor(role: Role) -> ActorContext {
    actor_at(role, afternoon())
}

pub fn directeur_with_bypass(now: DateTime<Utc>) -> ActorContext {
    ActorContext::new(
        String::from("do-1"),
        Role::DirecteurOperations,
        true,
        now,
    )
}

pub fn clean_credit() -> CreditAssessment {
    CreditAssessment {
        blocked: false,
        warning: None,
    }
}

pub fn blocked_credit() -> CreditAssessment {
    CreditAssessment {
        blocked: true,
        warning: None,
    }
}

pub fn draft() -> OrderDraft {
    OrderDraft {
        quote_id: None,
        client: ClientRef::new("CL-001"),
        formula: FormulaRef::new("B25"),
        volume_m3: 8.0,
        price_per_m3: 850.0,
        zone: ZoneRef::new("Z-NORD"),
        zone_surcharge: Money::from_centimes(5_000),
        scheduled_delivery: None,
        transport: None,
        justification: None,
    }
}

pub fn order_id() -> OrderId {
    OrderId::new("BC-20260302-0A1B2C")
}

/// A valid emergency justification (well past the 10-character minimum).
pub const NIGHT_REASON: &str = "Client chantier urgent, coulage nocturne";

/// Creates an order as an administrative agent: `ReadyForProduction`,
/// price locked.
pub fn ready_order() -> Order {
    create_order(
        order_id(),
        draft(),
        &actor(Role::AgentAdministratif),
        &clean_credit(),
        false,
    )
    .unwrap()
    .order
}

/// Creates an emergency-bypass order and marks its technical-review
/// alert as emitted, the way the boundary layer does after fan-out.
pub fn emergency_order() -> Order {
    let mut draft = draft();
    draft.justification = Some(String::from(NIGHT_REASON));
    let mut order = create_order(
        order_id(),
        draft,
        &directeur_with_bypass(night()),
        &clean_credit(),
        true,
    )
    .unwrap()
    .order;
    order.technical_review_alerted = true;
    order
}

/// Advances an order through the given commands as a centraliste,
/// asserting each step succeeds.
pub fn advance(order: Order, commands: Vec<Command>) -> Order {
    let centraliste = actor(Role::Centraliste);
    commands.into_iter().fold(order, |current, command| {
        let result: Result<TransitionResult, CoreError> = apply(&current, command, &centraliste);
        result.unwrap().new_order
    })
}

/// Drives a quality-checked order to `InDelivery` with a 09:00 departure.
pub fn order_in_delivery() -> Order {
    let mut order = ready_order();
    order.quality_checked = true;
    advance(
        order,
        vec![
            Command::StartProduction,
            Command::StartLoading,
            Command::Depart {
                departed_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
            },
        ],
    )
}

/// Drives an order to `Delivered` (arrival 09:30, cheque signature).
pub fn delivered_order() -> Order {
    advance(
        order_in_delivery(),
        vec![Command::ConfirmDelivery {
            arrived_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
            payment_mode: PaymentMode::Cheque,
        }],
    )
}
