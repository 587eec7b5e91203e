// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use betonflow::CoreError;
use betonflow_domain::DomainError;
use betonflow_store::StoreError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract; translation is explicit so internal errors are never leaked
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The actor's role does not permit the attempted action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role that attempted it.
        role: String,
    },
    /// The client is blacklisted; order creation is blocked
    /// unconditionally.
    ClientBlocked {
        /// The blacklisted client reference.
        client: String,
    },
    /// The emergency bypass requires an adequate justification.
    JustificationRequired {
        /// The minimum acceptable justification length.
        minimum: usize,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The record changed concurrently; re-read and decide whether to
    /// retry.
    ConcurrentModification {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A stored record violates an engine invariant.
    ///
    /// Loud by design: surfaced for manual investigation, never
    /// auto-corrected or silently absorbed.
    IntegrityError {
        /// A description of the violated invariant.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized { action, role } => {
                write!(f, "Unauthorized: role '{role}' may not {action}")
            }
            Self::ClientBlocked { client } => {
                write!(f, "Client '{client}' is blacklisted; order creation is blocked")
            }
            Self::JustificationRequired { minimum } => {
                write!(
                    f,
                    "Emergency bypass requires a justification of at least {minimum} characters"
                )
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ConcurrentModification { message } => {
                write!(f, "Concurrent modification: {message}")
            }
            Self::IntegrityError { message } => {
                write!(f, "Integrity error: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidVolume(msg) => ApiError::InvalidInput {
            field: String::from("volume_m3"),
            message: msg,
        },
        DomainError::InvalidUnitPrice(msg) => ApiError::InvalidInput {
            field: String::from("price_per_m3"),
            message: msg,
        },
        DomainError::AmountOverflow { operation } => ApiError::InvalidInput {
            field: String::from("amount"),
            message: format!("currency amount overflow while {operation}"),
        },
        DomainError::InvalidReference { field, message } => {
            ApiError::InvalidInput { field, message }
        }
        DomainError::InvalidJustification { minimum, .. } => {
            ApiError::JustificationRequired { minimum }
        }
        DomainError::InvalidTimezone(tz) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("'{tz}' is not a valid IANA timezone"),
        },
        DomainError::InvalidWindowHour(hour) => ApiError::InvalidInput {
            field: String::from("window_start_hour"),
            message: format!("start hour must be 0-23, got {hour}"),
        },
        DomainError::InvalidPaymentMode(s) => ApiError::InvalidInput {
            field: String::from("payment_mode"),
            message: format!("unknown payment mode '{s}'"),
        },
        DomainError::InvalidRole(s) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("unknown role '{s}'"),
        },
        DomainError::InvalidOrderStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("unknown order status '{s}'"),
        },
        DomainError::InvalidQuoteStatus(s) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("unknown quote status '{s}'"),
        },
        DomainError::IllegalQuoteTransition { quote_id, from, to } => {
            ApiError::DomainRuleViolation {
                rule: String::from("quote_transition_table"),
                message: format!("quote {quote_id}: illegal transition {from} -> {to}"),
            }
        }
        DomainError::QuoteNotApproved { quote_id, status } => ApiError::DomainRuleViolation {
            rule: String::from("quote_approved_before_conversion"),
            message: format!("quote {quote_id} is {status}, not approved"),
        },
        DomainError::QuoteAlreadyConverted { quote_id } => ApiError::DomainRuleViolation {
            rule: String::from("quote_converted_once"),
            message: format!("quote {quote_id} has already been converted"),
        },
        DomainError::QuoteImmutable { quote_id, status } => ApiError::DomainRuleViolation {
            rule: String::from("quote_terms_frozen"),
            message: format!("quote {quote_id} cannot be edited in status {status}"),
        },
        DomainError::PriceLocked { order_id } => ApiError::DomainRuleViolation {
            rule: String::from("price_locked"),
            message: format!("order {order_id}: volume and price are immutable once locked"),
        },
        DomainError::NonMonotonicMilestones { order_id, detail } => {
            ApiError::DomainRuleViolation {
                rule: String::from("milestone_monotonicity"),
                message: format!("order {order_id}: {detail}"),
            }
        }
        DomainError::IntegrityViolation { order_id, detail } => ApiError::IntegrityError {
            message: format!("order {order_id}: {detail}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ClientBlocked { client } => ApiError::ClientBlocked { client },
        CoreError::JustificationRequired { minimum } => {
            ApiError::JustificationRequired { minimum }
        }
        CoreError::InsufficientRole { role, action } => ApiError::Unauthorized {
            action,
            role: role.to_string(),
        },
        CoreError::IllegalTransition { order_id, from, to } => ApiError::DomainRuleViolation {
            rule: String::from("transition_table"),
            message: format!("order {order_id}: illegal transition {from} -> {to}"),
        },
        CoreError::MissingEvidence { order_id, evidence } => ApiError::InvalidInput {
            field: String::from("evidence"),
            message: format!("order {order_id}: missing {evidence}"),
        },
        CoreError::QualityCheckRequired { order_id } => ApiError::DomainRuleViolation {
            rule: String::from("quality_check_before_delivery"),
            message: format!("order {order_id}: delivery requires a recorded quality check"),
        },
        CoreError::TechnicalAlertNotEmitted { order_id } => ApiError::DomainRuleViolation {
            rule: String::from("technical_alert_before_delivery"),
            message: format!(
                "order {order_id}: the technical review alert has not been emitted"
            ),
        },
        CoreError::OrderImmutable { order_id, status } => ApiError::DomainRuleViolation {
            rule: String::from("order_immutable"),
            message: format!("order {order_id} is immutable in status {status}"),
        },
        CoreError::MilestoneAlreadyRecorded {
            order_id,
            milestone,
        } => ApiError::DomainRuleViolation {
            rule: String::from("milestone_recorded_once"),
            message: format!("order {order_id}: milestone '{milestone}' already recorded"),
        },
    }
}

/// Translates a store error into an API error.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::IdCollision { id } => ApiError::Internal {
            message: format!("identifier '{id}' collided past the retry budget"),
        },
        StoreError::VersionConflict {
            id,
            expected,
            actual,
        } => ApiError::ConcurrentModification {
            message: format!(
                "record '{id}' changed concurrently: expected status '{expected}', found '{actual}'"
            ),
        },
        StoreError::OrderNotFound { order_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("order '{order_id}' does not exist"),
        },
        StoreError::QuoteNotFound { quote_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Quote"),
            message: format!("quote '{quote_id}' does not exist"),
        },
    }
}
