// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use betonflow_domain::{DomainError, OrderStatus, Role};

/// Errors that can occur during order creation and state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The client is blacklisted. Unconditional; no role or emergency
    /// flag opens a path past it inside this engine.
    ClientBlocked {
        /// The blacklisted client reference.
        client: String,
    },
    /// An emergency bypass was attempted without an adequate
    /// justification.
    JustificationRequired {
        /// The minimum acceptable justification length.
        minimum: usize,
    },
    /// The actor's role does not permit the attempted action.
    InsufficientRole {
        /// The actor's role.
        role: Role,
        /// The action that was attempted.
        action: String,
    },
    /// The requested transition is not the declared successor of the
    /// current status.
    IllegalTransition {
        /// The order identifier.
        order_id: String,
        /// The current status.
        from: OrderStatus,
        /// The requested status.
        to: OrderStatus,
    },
    /// Required evidence for the transition is missing.
    MissingEvidence {
        /// The order identifier.
        order_id: String,
        /// The missing evidence.
        evidence: String,
    },
    /// Delivery requires the external quality check to have been
    /// recorded (non-emergency orders).
    QualityCheckRequired {
        /// The order identifier.
        order_id: String,
    },
    /// Delivery of an emergency order requires the technical-review
    /// alert to have actually been emitted.
    TechnicalAlertNotEmitted {
        /// The order identifier.
        order_id: String,
    },
    /// The order is in a state that forbids the attempted operation.
    OrderImmutable {
        /// The order identifier.
        order_id: String,
        /// The order's current status.
        status: OrderStatus,
    },
    /// A rotation milestone was already recorded and cannot be replaced.
    MilestoneAlreadyRecorded {
        /// The order identifier.
        order_id: String,
        /// The milestone name.
        milestone: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ClientBlocked { client } => {
                write!(f, "Client '{client}' is blacklisted; order creation is blocked")
            }
            Self::JustificationRequired { minimum } => {
                write!(
                    f,
                    "Emergency bypass requires a justification of at least {minimum} characters"
                )
            }
            Self::InsufficientRole { role, action } => {
                write!(f, "Role '{role}' is not permitted to {action}")
            }
            Self::IllegalTransition { order_id, from, to } => {
                write!(f, "Order {order_id}: illegal transition {from} -> {to}")
            }
            Self::MissingEvidence { order_id, evidence } => {
                write!(f, "Order {order_id}: missing {evidence}")
            }
            Self::QualityCheckRequired { order_id } => {
                write!(
                    f,
                    "Order {order_id}: delivery requires a recorded quality check"
                )
            }
            Self::TechnicalAlertNotEmitted { order_id } => {
                write!(
                    f,
                    "Order {order_id}: delivery of an emergency order requires the technical \
                     review alert to have been emitted"
                )
            }
            Self::OrderImmutable { order_id, status } => {
                write!(f, "Order {order_id} is immutable in status {status}")
            }
            Self::MilestoneAlreadyRecorded {
                order_id,
                milestone,
            } => {
                write!(f, "Order {order_id}: milestone '{milestone}' already recorded")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
