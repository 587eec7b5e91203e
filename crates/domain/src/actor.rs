// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor roles and the centralized role-to-capability table.
//!
//! Role checks live here and nowhere else. Every gate in the engine asks
//! this table instead of re-deriving its own booleans, so an authorization
//! rule has exactly one place to change.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Plant roles known to the dispatch engine.
///
/// Roles are produced by the external authentication collaborator; this
/// engine only consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Chief executive. Price-authoritative.
    Ceo,
    /// Plant supervisor. Price-authoritative.
    Superviseur,
    /// Administrative agent. Price-authoritative.
    AgentAdministratif,
    /// Operations director. May create orders pending validation, and may
    /// bypass price validation during the emergency window when granted
    /// the bypass capability.
    DirecteurOperations,
    /// Technical manager. Records quality checks and receives the
    /// formula re-check alert on emergency bypasses.
    ResponsableTechnique,
    /// Batch plant operator (centraliste). Advances production and
    /// delivery milestones.
    Centraliste,
    /// Sales. Creates quotes.
    Commercial,
    /// Accounting. Issues invoices.
    Accounting,
    /// Auditor. Read-only.
    Auditeur,
    /// Yard operator. Advances production and delivery milestones.
    Operator,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ceo => "ceo",
            Self::Superviseur => "superviseur",
            Self::AgentAdministratif => "agent_administratif",
            Self::DirecteurOperations => "directeur_operations",
            Self::ResponsableTechnique => "responsable_technique",
            Self::Centraliste => "centraliste",
            Self::Commercial => "commercial",
            Self::Accounting => "accounting",
            Self::Auditeur => "auditeur",
            Self::Operator => "operator",
        }
    }

    /// Whether this role may set and lock prices without further review.
    ///
    /// Price-authoritative roles create orders directly in
    /// `ReadyForProduction` with the price locked, and validate orders
    /// queued in `PendingValidation`.
    #[must_use]
    pub const fn is_price_authoritative(&self) -> bool {
        matches!(self, Self::Ceo | Self::Superviseur | Self::AgentAdministratif)
    }

    /// Whether this role may submit an order creation intent at all.
    #[must_use]
    pub const fn can_create_order(&self) -> bool {
        self.is_price_authoritative() || matches!(self, Self::DirecteurOperations)
    }

    /// Whether this role may create a quote.
    #[must_use]
    pub const fn can_create_quote(&self) -> bool {
        self.can_create_order() || matches!(self, Self::Commercial)
    }

    /// Whether this role may approve or reject a pending quote.
    #[must_use]
    pub const fn can_approve_quote(&self) -> bool {
        self.is_price_authoritative()
    }

    /// Whether this role may validate the price of a pending order.
    #[must_use]
    pub const fn can_validate_price(&self) -> bool {
        self.is_price_authoritative()
    }

    /// Whether this role may advance production and delivery milestones.
    #[must_use]
    pub const fn can_advance_rotation(&self) -> bool {
        self.is_price_authoritative()
            || matches!(
                self,
                Self::DirecteurOperations | Self::Centraliste | Self::Operator
            )
    }

    /// Whether this role may record a technical quality check.
    #[must_use]
    pub const fn can_record_quality_check(&self) -> bool {
        self.is_price_authoritative() || matches!(self, Self::ResponsableTechnique)
    }

    /// Whether this role may issue an invoice.
    #[must_use]
    pub const fn can_invoice(&self) -> bool {
        self.is_price_authoritative() || matches!(self, Self::Accounting)
    }

    /// Whether this role may cancel a non-terminal order.
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        self.is_price_authoritative() || matches!(self, Self::DirecteurOperations)
    }

    /// Whether this role is eligible for the emergency bypass protocol.
    ///
    /// Eligibility is necessary but not sufficient: the actor must also
    /// carry the `can_bypass_emergency` capability from the auth
    /// collaborator, and the clock must be inside the window.
    #[must_use]
    pub const fn is_emergency_eligible(&self) -> bool {
        matches!(self, Self::DirecteurOperations)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ceo" => Ok(Self::Ceo),
            "superviseur" => Ok(Self::Superviseur),
            "agent_administratif" => Ok(Self::AgentAdministratif),
            "directeur_operations" => Ok(Self::DirecteurOperations),
            "responsable_technique" => Ok(Self::ResponsableTechnique),
            "centraliste" => Ok(Self::Centraliste),
            "commercial" => Ok(Self::Commercial),
            "accounting" => Ok(Self::Accounting),
            "auditeur" => Ok(Self::Auditeur),
            "operator" => Ok(Self::Operator),
            _ => Err(DomainError::InvalidRole(s.to_owned())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The acting party of an engine call: identity, role, capabilities and
/// the caller's wall-clock time.
///
/// The engine never reads a live clock internally; `now` is always
/// supplied by the caller so every decision is replayable in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// Stable identifier of the actor (login, badge).
    pub actor_id: String,
    /// The actor's role.
    pub role: Role,
    /// Capability granted by the auth collaborator to use the emergency
    /// bypass. Meaningful only for emergency-eligible roles.
    pub can_bypass_emergency: bool,
    /// The actor's current wall-clock time (UTC).
    pub now: DateTime<Utc>,
}

impl ActorContext {
    /// Creates a new `ActorContext`.
    ///
    /// # Arguments
    ///
    /// * `actor_id` - Stable identifier of the actor
    /// * `role` - The actor's role
    /// * `can_bypass_emergency` - Bypass capability from the auth collaborator
    /// * `now` - The caller's current wall-clock time (UTC)
    #[must_use]
    pub const fn new(
        actor_id: String,
        role: Role,
        can_bypass_emergency: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            actor_id,
            role,
            can_bypass_emergency,
            now,
        }
    }
}
