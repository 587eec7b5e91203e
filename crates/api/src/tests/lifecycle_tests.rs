// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end lifecycle tests: transitions, the compare-and-swap
//! discipline, and the inbound quality-control signal.

use super::helpers::{
    Rig, actor, clean_profile, night, directeur_with_bypass, request, rig, NIGHT_REASON,
};
use crate::request_response::{TransitionAction, TransitionOrderRequest};
use crate::{
    ApiError, create_order, record_quality_check, record_return, transition_order,
};
use betonflow_domain::{Order, OrderStatus, PaymentMode, Role};
use betonflow_store::OrderStore;
use chrono::{TimeZone, Utc};

fn ready_order(rig: &mut Rig) -> Order {
    create_order(
        &mut rig.store,
        &mut rig.audit,
        &mut rig.alerts,
        &rig.config,
        request(),
        &actor(Role::AgentAdministratif),
        &clean_profile(),
    )
    .unwrap()
    .order
}

fn transition(
    rig: &mut Rig,
    order: &Order,
    expected: OrderStatus,
    action: TransitionAction,
    role: Role,
) -> Result<Order, ApiError> {
    transition_order(
        &mut rig.store,
        &mut rig.audit,
        TransitionOrderRequest {
            order_id: order.order_id.value().to_owned(),
            expected_status: expected,
            action,
        },
        &actor(role),
    )
    .map(|response| response.order)
}

#[test]
fn test_full_lifecycle_to_invoice() {
    let mut rig = rig();
    let order = ready_order(&mut rig);

    record_quality_check(
        &mut rig.store,
        &mut rig.audit,
        order.order_id.value(),
        &actor(Role::ResponsableTechnique),
    )
    .unwrap();

    let order = transition(
        &mut rig,
        &order,
        OrderStatus::ReadyForProduction,
        TransitionAction::StartProduction,
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::InProduction,
        TransitionAction::StartLoading,
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::Loading,
        TransitionAction::Depart {
            departed_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        },
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::InDelivery,
        TransitionAction::ConfirmDelivery {
            arrived_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
            payment_mode: PaymentMode::Cheque,
        },
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::Delivered,
        TransitionAction::Invoice,
        Role::Accounting,
    )
    .unwrap();

    assert_eq!(order.status, OrderStatus::Invoiced);
    let stored = rig.store.get_order(&order.order_id).unwrap();
    assert_eq!(stored.status, OrderStatus::Invoiced);
    assert!(stored.check_integrity().is_ok());
}

#[test]
fn test_stale_expected_status_is_a_conflict() {
    // Two dispatchers race: the second, still holding the old status,
    // must get a conflict rather than a duplicate transition.
    let mut rig = rig();
    let order = ready_order(&mut rig);
    record_quality_check(
        &mut rig.store,
        &mut rig.audit,
        order.order_id.value(),
        &actor(Role::ResponsableTechnique),
    )
    .unwrap();

    transition(
        &mut rig,
        &order,
        OrderStatus::ReadyForProduction,
        TransitionAction::StartProduction,
        Role::Centraliste,
    )
    .unwrap();

    let result = transition(
        &mut rig,
        &order,
        OrderStatus::ReadyForProduction,
        TransitionAction::StartProduction,
        Role::Centraliste,
    );
    assert!(matches!(result, Err(ApiError::ConcurrentModification { .. })));

    // The stored record kept the first writer's state.
    let stored = rig.store.get_order(&order.order_id).unwrap();
    assert_eq!(stored.status, OrderStatus::InProduction);
}

#[test]
fn test_departure_without_quality_check_is_refused() {
    let mut rig = rig();
    let order = ready_order(&mut rig);

    let order = transition(
        &mut rig,
        &order,
        OrderStatus::ReadyForProduction,
        TransitionAction::StartProduction,
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::InProduction,
        TransitionAction::StartLoading,
        Role::Centraliste,
    )
    .unwrap();

    let result = transition(
        &mut rig,
        &order,
        OrderStatus::Loading,
        TransitionAction::Depart {
            departed_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        },
        Role::Centraliste,
    );
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "quality_check_before_delivery"
    ));
}

#[test]
fn test_emergency_departure_blocked_until_alert_emitted() {
    let mut rig = rig();
    let mut failing = super::helpers::FailingAlertSink;
    let mut night_request = request();
    night_request.justification = Some(String::from(NIGHT_REASON));

    // Created with every alert failing: the technical-review flag is
    // down.
    let order = create_order(
        &mut rig.store,
        &mut rig.audit,
        &mut failing,
        &rig.config,
        night_request,
        &directeur_with_bypass(night()),
        &clean_profile(),
    )
    .unwrap()
    .order;

    let order = transition(
        &mut rig,
        &order,
        OrderStatus::ReadyForProduction,
        TransitionAction::StartProduction,
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::InProduction,
        TransitionAction::StartLoading,
        Role::Centraliste,
    )
    .unwrap();

    let result = transition(
        &mut rig,
        &order,
        OrderStatus::Loading,
        TransitionAction::Depart { departed_at: night() },
        Role::Centraliste,
    );
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "technical_alert_before_delivery"
    ));
}

#[test]
fn test_cancellation_is_logged_with_actor_and_reason() {
    let mut rig = rig();
    let order = ready_order(&mut rig);

    let cancelled = transition(
        &mut rig,
        &order,
        OrderStatus::ReadyForProduction,
        TransitionAction::Cancel {
            reason: String::from("client insolvent"),
        },
        Role::DirecteurOperations,
    )
    .unwrap();

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    let event = rig.audit.events.last().unwrap();
    assert_eq!(event.actor.id, "directeur_operations-1");
    assert_eq!(event.payload["reason"], "client insolvent");
}

#[test]
fn test_locked_price_cannot_be_amended_through_the_api() {
    let mut rig = rig();
    let order = ready_order(&mut rig);

    let result = transition(
        &mut rig,
        &order,
        OrderStatus::ReadyForProduction,
        TransitionAction::AmendPricing {
            volume_m3: 10.0,
            price_per_m3: 900.0,
        },
        Role::Ceo,
    );
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "price_locked"
    ));

    // Stored volume and price are untouched.
    let stored = rig.store.get_order(&order.order_id).unwrap();
    assert_eq!(stored.volume_m3, 8.0);
    assert_eq!(stored.price_per_m3, 850.0);
}

#[test]
fn test_return_milestone_closes_the_rotation() {
    let mut rig = rig();
    let order = ready_order(&mut rig);
    record_quality_check(
        &mut rig.store,
        &mut rig.audit,
        order.order_id.value(),
        &actor(Role::ResponsableTechnique),
    )
    .unwrap();

    let order = transition(
        &mut rig,
        &order,
        OrderStatus::ReadyForProduction,
        TransitionAction::StartProduction,
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::InProduction,
        TransitionAction::StartLoading,
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::Loading,
        TransitionAction::Depart {
            departed_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        },
        Role::Centraliste,
    )
    .unwrap();
    let order = transition(
        &mut rig,
        &order,
        OrderStatus::InDelivery,
        TransitionAction::ConfirmDelivery {
            arrived_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap(),
            payment_mode: PaymentMode::Cash,
        },
        Role::Centraliste,
    )
    .unwrap();

    let response = record_return(
        &mut rig.store,
        &mut rig.audit,
        order.order_id.value(),
        Utc.with_ymd_and_hms(2026, 3, 2, 10, 15, 0).unwrap(),
        &actor(Role::Centraliste),
    )
    .unwrap();
    assert!(response.order.returned.is_some());
}

#[test]
fn test_corrupted_stored_order_surfaces_an_integrity_error() {
    let mut rig = rig();
    let mut order = ready_order(&mut rig);

    // Simulate out-of-band tampering: the stored total no longer matches
    // the locked price.
    order.total = betonflow_domain::Money::from_centimes(1);
    let mut corrupted_store = betonflow_store::InMemoryOrderStore::new();
    corrupted_store.insert_order(order.clone()).unwrap();

    let result = transition_order(
        &mut corrupted_store,
        &mut rig.audit,
        TransitionOrderRequest {
            order_id: order.order_id.value().to_owned(),
            expected_status: OrderStatus::ReadyForProduction,
            action: TransitionAction::StartProduction,
        },
        &actor(Role::Centraliste),
    );
    assert!(matches!(result, Err(ApiError::IntegrityError { .. })));
}

#[test]
fn test_unknown_order_is_not_found() {
    let mut rig = rig();
    let result = transition_order(
        &mut rig.store,
        &mut rig.audit,
        TransitionOrderRequest {
            order_id: String::from("BC-00000000-000000"),
            expected_status: OrderStatus::ReadyForProduction,
            action: TransitionAction::StartProduction,
        },
        &actor(Role::Centraliste),
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
