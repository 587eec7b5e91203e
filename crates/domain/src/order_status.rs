// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle status of an order (Bon de Commande).
///
/// Statuses move strictly forward through the delivery chain; the only
/// lateral edge is cancellation from any non-terminal status. There is no
/// backward edge in this engine: rollback, if it exists at all, is an
/// administrative override outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created by a non-authoritative role; queued for price validation.
    #[default]
    PendingValidation,
    /// Price settled (validated or emergency-bypassed); production may start.
    ReadyForProduction,
    /// Concrete batch in production at the plant.
    InProduction,
    /// Truck at the loading bay.
    Loading,
    /// Truck en route to the site.
    InDelivery,
    /// Delivery signed on site.
    Delivered,
    /// Invoice issued. Terminal.
    Invoiced,
    /// Administratively cancelled. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingValidation => "pending_validation",
            Self::ReadyForProduction => "ready_for_production",
            Self::InProduction => "in_production",
            Self::Loading => "loading",
            Self::InDelivery => "in_delivery",
            Self::Delivered => "delivered",
            Self::Invoiced => "invoiced",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether this status is terminal.
    ///
    /// Terminal orders are immutable: no further transition, milestone or
    /// pricing change is accepted.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Invoiced | Self::Cancelled)
    }

    /// Returns whether the delivery has been signed in this status.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Delivered | Self::Invoiced)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// The forward chain is:
    /// `PendingValidation` → `ReadyForProduction` → `InProduction` →
    /// `Loading` → `InDelivery` → `Delivered` → `Invoiced`,
    /// plus any non-terminal status → `Cancelled`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::PendingValidation, Self::ReadyForProduction)
                | (Self::ReadyForProduction, Self::InProduction)
                | (Self::InProduction, Self::Loading)
                | (Self::Loading, Self::InDelivery)
                | (Self::InDelivery, Self::Delivered)
                | (Self::Delivered, Self::Invoiced)
        ) || (!self.is_terminal() && matches!(target, Self::Cancelled))
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_validation" => Ok(Self::PendingValidation),
            "ready_for_production" => Ok(Self::ReadyForProduction),
            "in_production" => Ok(Self::InProduction),
            "loading" => Ok(Self::Loading),
            "in_delivery" => Ok(Self::InDelivery),
            "delivered" => Ok(Self::Delivered),
            "invoiced" => Ok(Self::Invoiced),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidOrderStatus(s.to_owned())),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
