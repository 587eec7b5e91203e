// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use betonflow_domain::{
    CreditWarning, Money, Order, OrderStatus, PaymentMode, Quote, TransportResource,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An advisory capability flag for UI gating.
///
/// Capabilities expose what an actor is permitted to do without leaking
/// engine internals. They are advisory only and never replace the
/// engine's own authorization checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is denied.
    Denied,
}

impl Capability {
    /// Converts a boolean into a capability flag.
    #[must_use]
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }

    /// Returns whether the capability is allowed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Advisory capabilities of an actor against the dispatch engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchCapabilities {
    /// May create quotes.
    pub can_create_quote: Capability,
    /// May approve or reject pending quotes.
    pub can_approve_quote: Capability,
    /// May submit order creation intents.
    pub can_create_order: Capability,
    /// May validate the price of pending orders.
    pub can_validate_price: Capability,
    /// May advance production and delivery milestones.
    pub can_advance_rotation: Capability,
    /// May issue invoices.
    pub can_invoice: Capability,
    /// May cancel non-terminal orders.
    pub can_cancel: Capability,
    /// May use the emergency bypass right now (role, capability and
    /// clock all aligned).
    pub can_use_emergency_bypass: Capability,
}

/// API request to create a new quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateQuoteRequest {
    /// The client reference.
    pub client: String,
    /// The concrete formula reference.
    pub formula: String,
    /// Quoted volume in cubic meters.
    pub volume_m3: f64,
    /// Quoted unit price per cubic meter.
    pub price_per_m3: f64,
}

/// API request to create a new order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// The client reference.
    pub client: String,
    /// The concrete formula reference.
    pub formula: String,
    /// Ordered volume in cubic meters.
    pub volume_m3: f64,
    /// Unit price per cubic meter.
    pub price_per_m3: f64,
    /// The delivery zone code.
    pub zone: String,
    /// Flat delivery surcharge for the zone, resolved by the host.
    pub zone_surcharge: Money,
    /// Scheduled delivery time agreed with the client, if any.
    pub scheduled_delivery: Option<DateTime<Utc>>,
    /// Assigned transport resource, if already known.
    pub transport: Option<TransportResource>,
    /// Emergency bypass justification, when applicable.
    pub justification: Option<String>,
}

/// API request to convert an approved quote into an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertQuoteRequest {
    /// The quote to consume.
    pub quote_id: String,
    /// The delivery zone code.
    pub zone: String,
    /// Flat delivery surcharge for the zone, resolved by the host.
    pub zone_surcharge: Money,
    /// Scheduled delivery time agreed with the client, if any.
    pub scheduled_delivery: Option<DateTime<Utc>>,
    /// Assigned transport resource, if already known.
    pub transport: Option<TransportResource>,
    /// Emergency bypass justification, when applicable.
    pub justification: Option<String>,
}

/// The transition requested against an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum TransitionAction {
    /// Validate and lock the price of a pending order.
    ValidatePrice,
    /// Start batching the concrete.
    StartProduction,
    /// Truck at the bay, loading.
    StartLoading,
    /// Truck leaves the plant.
    Depart {
        /// The departure instant.
        departed_at: DateTime<Utc>,
    },
    /// Delivery signed on site.
    ConfirmDelivery {
        /// The arrival instant.
        arrived_at: DateTime<Utc>,
        /// Payment mode recorded at signature.
        payment_mode: PaymentMode,
    },
    /// Issue the invoice.
    Invoice,
    /// Administrative cancellation with a mandatory reason.
    Cancel {
        /// Why the order is cancelled.
        reason: String,
    },
    /// Re-price a pending order before validation.
    AmendPricing {
        /// The new volume in cubic meters.
        volume_m3: f64,
        /// The new unit price per cubic meter.
        price_per_m3: f64,
    },
}

/// API request to transition an order.
///
/// `expected_status` implements the optimistic concurrency discipline:
/// the transition fails with a conflict if the stored status has already
/// changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionOrderRequest {
    /// The order to transition.
    pub order_id: String,
    /// The status the caller last observed.
    pub expected_status: OrderStatus,
    /// The requested transition.
    pub action: TransitionAction,
}

/// API response for a successful order creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    /// The created order.
    pub order: Order,
    /// The advisory credit warning, if one fired.
    pub credit_warning: Option<CreditWarning>,
    /// How many alerts were attempted (3 for emergency bypasses, else 0).
    pub alerts_attempted: usize,
    /// How many alert attempts were accepted by the sink.
    pub alerts_delivered: usize,
    /// A success message.
    pub message: String,
}

/// API response carrying an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// The order after the operation.
    pub order: Order,
    /// A success message.
    pub message: String,
}

/// API response carrying a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// The quote after the operation.
    pub quote: Quote,
    /// A success message.
    pub message: String,
}
