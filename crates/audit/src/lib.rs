// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Audit events, alerts, and the external sink ports.
//!
//! Every qualifying engine action produces exactly one structured audit
//! event; the emergency bypass additionally fans out alerts. Delivery of
//! both is an external collaborator's concern: this crate only defines
//! the immutable event/alert values and the sink traits the boundary
//! layer calls.

use betonflow_domain::Role;
use serde::{Deserialize, Serialize};

/// The entity performing an audited action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The actor's role at the time of the action.
    pub role: Role,
}

impl Actor {
    /// Creates a new `Actor`.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The actor's role
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }
}

/// The kind of audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    /// An order was created.
    OrderCreated,
    /// An order moved to a new status.
    OrderTransitioned,
    /// A pending order's volume or unit price was amended.
    OrderRepriced,
    /// An order was administratively cancelled.
    OrderCancelled,
    /// The night emergency bypass was used to skip price validation.
    EmergencyBypassUsed,
    /// An order creation was attempted for a blacklisted client.
    ClientBlockedAttempt,
    /// An alert could not be delivered to its sink.
    AlertDeliveryFailure,
    /// The external quality-control workflow recorded its check.
    QualityCheckRecorded,
    /// The truck's return to the plant was recorded.
    RotationReturnRecorded,
    /// A quote was created.
    QuoteCreated,
    /// A quote was submitted for approval.
    QuoteSubmitted,
    /// A quote was approved, freezing its terms.
    QuoteApproved,
    /// A quote was rejected.
    QuoteRejected,
    /// A quote was consumed by conversion into an order.
    QuoteConverted,
}

impl AuditEventType {
    /// Converts this event type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OrderCreated => "ORDER_CREATED",
            Self::OrderTransitioned => "ORDER_TRANSITIONED",
            Self::OrderRepriced => "ORDER_REPRICED",
            Self::OrderCancelled => "ORDER_CANCELLED",
            Self::EmergencyBypassUsed => "EMERGENCY_BYPASS_USED",
            Self::ClientBlockedAttempt => "CLIENT_BLOCKED_ATTEMPT",
            Self::AlertDeliveryFailure => "ALERT_DELIVERY_FAILURE",
            Self::QualityCheckRecorded => "QUALITY_CHECK_RECORDED",
            Self::RotationReturnRecorded => "ROTATION_RETURN_RECORDED",
            Self::QuoteCreated => "QUOTE_CREATED",
            Self::QuoteSubmitted => "QUOTE_SUBMITTED",
            Self::QuoteApproved => "QUOTE_APPROVED",
            Self::QuoteRejected => "QUOTE_REJECTED",
            Self::QuoteConverted => "QUOTE_CONVERTED",
        }
    }
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable audit event.
///
/// Once created, an audit event is never mutated; it captures who acted,
/// what happened, to which order, when, and the action-specific details
/// as a structured payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The kind of action.
    pub event_type: AuditEventType,
    /// The order concerned, absent for pre-creation events such as a
    /// blocked attempt.
    pub order_id: Option<String>,
    /// The actor who initiated the action.
    pub actor: Actor,
    /// When the action happened (ISO 8601, UTC).
    pub timestamp: String,
    /// Action-specific structured fields (reason, previous status, ...).
    pub payload: serde_json::Value,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `event_type` - The kind of action
    /// * `order_id` - The order concerned, if one exists
    /// * `actor` - The actor who initiated the action
    /// * `timestamp` - When the action happened (ISO 8601, UTC)
    /// * `payload` - Action-specific structured fields
    #[must_use]
    pub const fn new(
        event_type: AuditEventType,
        order_id: Option<String>,
        actor: Actor,
        timestamp: String,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_type,
            order_id,
            actor,
            timestamp,
            payload,
        }
    }
}

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Requires immediate attention.
    Critical,
    /// Requires attention before the next process step.
    Warning,
}

impl AlertSeverity {
    /// Converts this severity to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
        }
    }
}

/// A role-addressed alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// The role the alert is addressed to.
    pub recipient_role: Role,
    /// The alert severity.
    pub severity: AlertSeverity,
    /// The order the alert concerns.
    pub order_id: String,
    /// Human-readable alert text.
    pub message: String,
}

/// Failure to hand an alert to the external notification collaborator.
///
/// This failure is audit-worthy but never fatal to the business
/// operation that triggered the alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertDeliveryError {
    /// Description of the delivery failure.
    pub reason: String,
}

impl std::fmt::Display for AlertDeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Alert delivery failed: {}", self.reason)
    }
}

impl std::error::Error for AlertDeliveryError {}

/// Failure to hand an audit event to the external sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditSinkError {
    /// Description of the sink failure.
    pub reason: String,
}

impl std::fmt::Display for AuditSinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Audit sink failed: {}", self.reason)
    }
}

impl std::error::Error for AuditSinkError {}

/// The external audit sink port.
pub trait AuditSink {
    /// Records one audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink cannot accept the event. The caller
    /// logs the failure; it never propagates as a business failure.
    fn record(&mut self, event: &AuditEvent) -> Result<(), AuditSinkError>;
}

/// The external alert delivery port.
pub trait AlertSink {
    /// Attempts to deliver one alert.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery could not be handed over. Each alert
    /// is attempted exactly once per qualifying event; retry, if any, is
    /// the collaborator's concern.
    fn deliver(&mut self, alert: &Alert) -> Result<(), AlertDeliveryError>;
}

/// An in-memory audit sink for tests and embedders without a real sink.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    /// All recorded events, in order.
    pub events: Vec<AuditEvent>,
}

impl MemoryAuditSink {
    /// Creates an empty in-memory sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&mut self, event: &AuditEvent) -> Result<(), AuditSinkError> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// An in-memory alert sink for tests and embedders without a real sink.
#[derive(Debug, Default)]
pub struct MemoryAlertSink {
    /// All delivered alerts, in order.
    pub delivered: Vec<Alert>,
}

impl MemoryAlertSink {
    /// Creates an empty in-memory sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delivered: Vec::new(),
        }
    }
}

impl AlertSink for MemoryAlertSink {
    fn deliver(&mut self, alert: &Alert) -> Result<(), AlertDeliveryError> {
        self.delivered.push(alert.clone());
        Ok(())
    }
}
