// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use betonflow_domain::{
    ClientRef, FormulaRef, Money, OrderStatus, PaymentMode, QuoteId, TransportResource, ZoneRef,
};
use chrono::{DateTime, Utc};

/// An order creation intent, as data.
///
/// A draft carries everything the approval gate needs to decide the
/// initial status; the identifier is assigned by the caller so that a
/// collision on insertion can be retried without rebuilding the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// The approved quote this draft was converted from, if any.
    pub quote_id: Option<QuoteId>,
    /// The ordering client.
    pub client: ClientRef,
    /// The concrete formula ordered.
    pub formula: FormulaRef,
    /// Ordered volume in cubic meters.
    pub volume_m3: f64,
    /// Unit price per cubic meter.
    pub price_per_m3: f64,
    /// The delivery zone.
    pub zone: ZoneRef,
    /// Flat delivery surcharge for the zone.
    pub zone_surcharge: Money,
    /// Scheduled delivery time agreed with the client, if any.
    pub scheduled_delivery: Option<DateTime<Utc>>,
    /// Assigned transport resource, if already known.
    pub transport: Option<TransportResource>,
    /// Emergency bypass justification, when the creator intends to use
    /// the night window.
    pub justification: Option<String>,
}

/// A command against an existing order: user or system intent as data.
///
/// Commands are the only way to request a state change on an order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// An authoritative role validates the price of a pending order,
    /// locking it.
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
    /// The external quality-control workflow signals its check.
    RecordQualityCheck,
    /// The truck's return to the plant.
    RecordReturn {
        /// The return instant.
        returned_at: DateTime<Utc>,
    },
    /// Re-price a pending order before validation.
    AmendPricing {
        /// The new volume in cubic meters.
        volume_m3: f64,
        /// The new unit price per cubic meter.
        price_per_m3: f64,
    },
}

impl Command {
    /// Returns the action name used in authorization errors and audit
    /// payloads.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ValidatePrice => "validate_price",
            Self::StartProduction => "start_production",
            Self::StartLoading => "start_loading",
            Self::Depart { .. } => "depart",
            Self::ConfirmDelivery { .. } => "confirm_delivery",
            Self::Invoice => "invoice",
            Self::Cancel { .. } => "cancel",
            Self::RecordQualityCheck => "record_quality_check",
            Self::RecordReturn { .. } => "record_return",
            Self::AmendPricing { .. } => "amend_pricing",
        }
    }

    /// Returns the status this command transitions into, if it is a
    /// status transition at all.
    #[must_use]
    pub const fn target_status(&self) -> Option<OrderStatus> {
        match self {
            Self::ValidatePrice => Some(OrderStatus::ReadyForProduction),
            Self::StartProduction => Some(OrderStatus::InProduction),
            Self::StartLoading => Some(OrderStatus::Loading),
            Self::Depart { .. } => Some(OrderStatus::InDelivery),
            Self::ConfirmDelivery { .. } => Some(OrderStatus::Delivered),
            Self::Invoice => Some(OrderStatus::Invoiced),
            Self::Cancel { .. } => Some(OrderStatus::Cancelled),
            Self::RecordQualityCheck | Self::RecordReturn { .. } | Self::AmendPricing { .. } => {
                None
            }
        }
    }
}
