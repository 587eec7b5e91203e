// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the approval gate decision table. Rules are evaluated in
//! order; the first match wins.

use super::helpers::{
    NIGHT_REASON, actor, blocked_credit, clean_credit, directeur_with_bypass, night, order_id,
};
use crate::{CoreError, bypass_alerts, decide};
use betonflow_audit::AlertSeverity;
use betonflow_domain::{ActorContext, ClientRef, OrderStatus, Role};

// ============================================================================
// Rule 1: blocked client
// ============================================================================

#[test]
fn test_blocked_client_fails_for_every_role() {
    let client = ClientRef::new("CL-001");
    for role in [
        Role::Ceo,
        Role::Superviseur,
        Role::AgentAdministratif,
        Role::DirecteurOperations,
    ] {
        let result = decide(&actor(role), &client, &blocked_credit(), false, None);
        assert!(matches!(result, Err(CoreError::ClientBlocked { .. })));
    }
}

#[test]
fn test_blocked_client_fails_even_in_the_window_with_justification() {
    let client = ClientRef::new("CL-001");
    let result = decide(
        &directeur_with_bypass(night()),
        &client,
        &blocked_credit(),
        true,
        Some(NIGHT_REASON),
    );
    assert!(matches!(result, Err(CoreError::ClientBlocked { .. })));
}

// ============================================================================
// Rule 2: price-authoritative roles
// ============================================================================

#[test]
fn test_authoritative_roles_lock_the_price() {
    let client = ClientRef::new("CL-001");
    for role in [Role::Ceo, Role::Superviseur, Role::AgentAdministratif] {
        let decision = decide(&actor(role), &client, &clean_credit(), false, None).unwrap();
        assert_eq!(decision.status, OrderStatus::ReadyForProduction);
        assert!(decision.price_locked);
        assert!(!decision.requires_alert);
        assert!(!decision.emergency);
    }
}

#[test]
fn test_authoritative_role_ignores_the_window() {
    let client = ClientRef::new("CL-001");
    let decision = decide(
        &actor(Role::Ceo),
        &client,
        &clean_credit(),
        true,
        None,
    )
    .unwrap();
    assert!(decision.price_locked);
    assert!(!decision.emergency);
}

// ============================================================================
// Rule 3: operations director
// ============================================================================

#[test]
fn test_directeur_outside_window_queues_for_validation() {
    let client = ClientRef::new("CL-001");
    let decision = decide(
        &actor(Role::DirecteurOperations),
        &client,
        &clean_credit(),
        false,
        None,
    )
    .unwrap();
    assert_eq!(decision.status, OrderStatus::PendingValidation);
    assert!(!decision.price_locked);
    assert!(!decision.requires_alert);
}

#[test]
fn test_directeur_in_window_without_capability_still_queues() {
    // The window alone grants nothing: without the bypass capability the
    // order is queued exactly as in daytime.
    let client = ClientRef::new("CL-001");
    let mut context: ActorContext = actor(Role::DirecteurOperations);
    context.now = night();
    let decision = decide(&context, &client, &clean_credit(), true, Some(NIGHT_REASON)).unwrap();
    assert_eq!(decision.status, OrderStatus::PendingValidation);
    assert!(!decision.emergency);
}

#[test]
fn test_bypass_grants_ready_without_locking() {
    let client = ClientRef::new("CL-001");
    let decision = decide(
        &directeur_with_bypass(night()),
        &client,
        &clean_credit(),
        true,
        Some(NIGHT_REASON),
    )
    .unwrap();
    assert_eq!(decision.status, OrderStatus::ReadyForProduction);
    // No authoritative review happened: the price is accepted as entered
    // but explicitly not locked.
    assert!(!decision.price_locked);
    assert!(decision.requires_alert);
    assert!(decision.emergency);
}

#[test]
fn test_bypass_without_justification_fails() {
    let client = ClientRef::new("CL-001");
    let result = decide(
        &directeur_with_bypass(night()),
        &client,
        &clean_credit(),
        true,
        None,
    );
    assert!(matches!(
        result,
        Err(CoreError::JustificationRequired { minimum: 10 })
    ));
}

#[test]
fn test_bypass_with_short_justification_fails() {
    let client = ClientRef::new("CL-001");
    let result = decide(
        &directeur_with_bypass(night()),
        &client,
        &clean_credit(),
        true,
        Some("court"),
    );
    assert!(matches!(result, Err(CoreError::JustificationRequired { .. })));
}

// ============================================================================
// Rule 4: everyone else
// ============================================================================

#[test]
fn test_other_roles_cannot_create_orders() {
    let client = ClientRef::new("CL-001");
    for role in [
        Role::ResponsableTechnique,
        Role::Centraliste,
        Role::Commercial,
        Role::Accounting,
        Role::Auditeur,
        Role::Operator,
    ] {
        let result = decide(&actor(role), &client, &clean_credit(), false, None);
        assert!(
            matches!(result, Err(CoreError::InsufficientRole { .. })),
            "{role} should be refused"
        );
    }
}

// ============================================================================
// Alert fan-out
// ============================================================================

#[test]
fn test_bypass_fan_out_is_exactly_three_alerts() {
    let alerts = bypass_alerts(&order_id(), &ClientRef::new("CL-001"), NIGHT_REASON);
    assert_eq!(alerts.len(), 3);

    assert_eq!(alerts[0].recipient_role, Role::Ceo);
    assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    assert_eq!(alerts[1].recipient_role, Role::Superviseur);
    assert_eq!(alerts[1].severity, AlertSeverity::Critical);
    assert_eq!(alerts[2].recipient_role, Role::ResponsableTechnique);
    assert_eq!(alerts[2].severity, AlertSeverity::Warning);
}

#[test]
fn test_technical_alert_asks_for_a_formula_recheck() {
    let alerts = bypass_alerts(&order_id(), &ClientRef::new("CL-001"), NIGHT_REASON);
    assert!(alerts[2].message.contains("formula"));
    assert!(alerts[0].message.contains(NIGHT_REASON));
}
