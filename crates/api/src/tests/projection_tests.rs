// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side projection tests: ETA estimation and rotation progress.

use super::helpers::{Rig, actor, clean_profile, request, rig};
use crate::request_response::{TransitionAction, TransitionOrderRequest};
use crate::{create_order, estimate_eta, record_quality_check, rotation_progress, transition_order};
use betonflow_domain::{EtaClassification, Order, OrderStatus, PaymentMode, Role};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
}

/// Drives a fresh order to `InDelivery` with a departure at 09:00.
fn departed_order(rig: &mut Rig) -> Order {
    let order = create_order(
        &mut rig.store,
        &mut rig.audit,
        &mut rig.alerts,
        &rig.config,
        request(),
        &actor(Role::AgentAdministratif),
        &clean_profile(),
    )
    .unwrap()
    .order;
    record_quality_check(
        &mut rig.store,
        &mut rig.audit,
        order.order_id.value(),
        &actor(Role::ResponsableTechnique),
    )
    .unwrap();

    let steps = [
        (OrderStatus::ReadyForProduction, TransitionAction::StartProduction),
        (OrderStatus::InProduction, TransitionAction::StartLoading),
        (
            OrderStatus::Loading,
            TransitionAction::Depart { departed_at: t(9, 0) },
        ),
    ];
    steps
        .into_iter()
        .fold(order, |current, (expected, action)| {
            transition_order(
                &mut rig.store,
                &mut rig.audit,
                TransitionOrderRequest {
                    order_id: current.order_id.value().to_owned(),
                    expected_status: expected,
                    action,
                },
                &actor(Role::Centraliste),
            )
            .unwrap()
            .order
        })
}

#[test]
fn test_late_delivery_scenario() {
    // Departure at T, 25 minutes of zone travel, now = T + 40: fifteen
    // minutes past the estimate, classified late.
    let mut rig = rig();
    let order = departed_order(&mut rig);

    let eta = estimate_eta(&rig.store, &rig.config, order.order_id.value(), t(9, 40)).unwrap();
    assert_eq!(eta.minutes_remaining, Some(-15));
    assert_eq!(eta.classification, EtaClassification::Late);
}

#[test]
fn test_eta_display_minutes_floor_at_zero() {
    let mut rig = rig();
    let order = departed_order(&mut rig);

    let mut previous: Option<i64> = None;
    for offset in 0..50 {
        let eta = estimate_eta(
            &rig.store,
            &rig.config,
            order.order_id.value(),
            t(9, 0) + Duration::minutes(offset),
        )
        .unwrap();
        let display = eta.minutes_remaining_display().unwrap();
        if let Some(prev) = previous {
            assert!(display <= prev, "display minutes must never increase");
        }
        previous = Some(display);
    }
    assert_eq!(previous, Some(0));
}

#[test]
fn test_eta_unknown_without_schedule_or_departure() {
    let mut rig = rig();
    let order = create_order(
        &mut rig.store,
        &mut rig.audit,
        &mut rig.alerts,
        &rig.config,
        request(),
        &actor(Role::AgentAdministratif),
        &clean_profile(),
    )
    .unwrap()
    .order;

    let eta = estimate_eta(&rig.store, &rig.config, order.order_id.value(), t(9, 0)).unwrap();
    assert_eq!(eta.classification, EtaClassification::Unknown);
}

#[test]
fn test_eta_scheduled_before_departure() {
    let mut rig = rig();
    let mut scheduled_request = request();
    scheduled_request.scheduled_delivery = Some(t(14, 0));

    let order = create_order(
        &mut rig.store,
        &mut rig.audit,
        &mut rig.alerts,
        &rig.config,
        scheduled_request,
        &actor(Role::AgentAdministratif),
        &clean_profile(),
    )
    .unwrap()
    .order;

    let eta = estimate_eta(&rig.store, &rig.config, order.order_id.value(), t(9, 0)).unwrap();
    assert_eq!(eta.classification, EtaClassification::Scheduled);
    assert_eq!(eta.arrival_estimate, Some(t(14, 25)));
    assert_eq!(eta.minutes_remaining, None);
}

#[test]
fn test_rotation_progress_through_the_lifecycle() {
    let mut rig = rig();
    let order = departed_order(&mut rig);

    let state = rotation_progress(&rig.store, order.order_id.value()).unwrap();
    assert!(state.departed);
    assert!(!state.arrived);
    assert_eq!(state.active_step, Some(1));

    let order = transition_order(
        &mut rig.store,
        &mut rig.audit,
        TransitionOrderRequest {
            order_id: order.order_id.value().to_owned(),
            expected_status: OrderStatus::InDelivery,
            action: TransitionAction::ConfirmDelivery {
                arrived_at: t(9, 30),
                payment_mode: PaymentMode::BankTransfer,
            },
        },
        &actor(Role::Centraliste),
    )
    .unwrap()
    .order;

    let state = rotation_progress(&rig.store, order.order_id.value()).unwrap();
    assert!(state.arrived);
    assert!(state.signed);
    assert_eq!(state.active_step, Some(3));

    let eta = estimate_eta(&rig.store, &rig.config, order.order_id.value(), t(16, 0)).unwrap();
    assert_eq!(eta.classification, EtaClassification::Delivered);
}

#[test]
fn test_unknown_order_projections_are_not_found() {
    let rig = rig();
    assert!(estimate_eta(&rig.store, &rig.config, "BC-00000000-000000", t(9, 0)).is_err());
    assert!(rotation_progress(&rig.store, "BC-00000000-000000").is_err());
}
