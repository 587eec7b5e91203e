// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Arrival estimation and lateness classification.
//!
//! The estimate is a pure projection: zone travel time applied to the
//! actual departure when the truck has left, or to the scheduled time
//! before that. Lateness is only classified against an actual departure;
//! before departure nothing has started and nothing can be late.

use crate::order::Order;
use crate::order_status::OrderStatus;
use crate::zone_travel::ZoneTravelModel;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Grace threshold in minutes past the estimate before a truck is late.
const LATE_THRESHOLD_MINUTES: i64 = -10;

/// Minutes-remaining ceiling of the "arriving about now" band.
const ON_TIME_CEILING_MINUTES: i64 = 15;

/// Lateness classification of a delivery in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EtaClassification {
    /// More than 10 minutes past the arrival estimate.
    Late,
    /// Within the window around the estimate: 10 minutes past to
    /// 15 minutes before.
    OnTime,
    /// En route, estimate comfortably ahead.
    EnRouteNormal,
    /// Not departed yet; estimate derived from the scheduled time.
    Scheduled,
    /// Delivery already signed. Terminal.
    Delivered,
    /// No scheduled time and no departure: nothing to estimate. This is
    /// a valid result, not a failure.
    Unknown,
}

impl EtaClassification {
    /// Converts this classification to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Late => "late",
            Self::OnTime => "on_time",
            Self::EnRouteNormal => "en_route_normal",
            Self::Scheduled => "scheduled",
            Self::Delivered => "delivered",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EtaClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An arrival estimate for a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eta {
    /// Estimated (or, once signed, actual) arrival instant.
    pub arrival_estimate: Option<DateTime<Utc>>,
    /// Signed minutes until the estimate; negative once past it. Only
    /// present while a departed delivery is in progress.
    pub minutes_remaining: Option<i64>,
    /// Lateness classification.
    pub classification: EtaClassification,
}

impl Eta {
    /// Minutes remaining floored at zero, for progress display.
    #[must_use]
    pub fn minutes_remaining_display(&self) -> Option<i64> {
        self.minutes_remaining.map(|minutes| minutes.max(0))
    }
}

/// Estimates the arrival of an order's delivery.
///
/// - Signed orders (`Delivered`, `Invoiced`) report the terminal
///   [`EtaClassification::Delivered`] regardless of timestamps.
/// - A departed order in `Loading` or `InDelivery` is estimated from its
///   departure plus zone travel time and classified for lateness.
/// - Before departure the estimate comes from the scheduled time, with no
///   lateness classification.
/// - Cancelled orders, and orders with neither a scheduled time nor a
///   departure, report [`EtaClassification::Unknown`].
///
/// # Arguments
///
/// * `order` - The order to estimate
/// * `now` - The caller's current wall-clock time (UTC)
/// * `zones` - The zone travel-time model
#[must_use]
pub fn estimate_eta(order: &Order, now: DateTime<Utc>, zones: &ZoneTravelModel) -> Eta {
    if order.status.is_signed() {
        return Eta {
            arrival_estimate: order.arrival,
            minutes_remaining: None,
            classification: EtaClassification::Delivered,
        };
    }
    if order.status == OrderStatus::Cancelled {
        return Eta {
            arrival_estimate: None,
            minutes_remaining: None,
            classification: EtaClassification::Unknown,
        };
    }

    let travel: Duration = Duration::minutes(i64::from(zones.travel_minutes(&order.zone)));

    if let Some(departure) = order.departure
        && matches!(order.status, OrderStatus::Loading | OrderStatus::InDelivery)
    {
        let arrival_estimate: DateTime<Utc> = departure + travel;
        let minutes_remaining: i64 = (arrival_estimate - now).num_minutes();
        let classification: EtaClassification = if minutes_remaining < LATE_THRESHOLD_MINUTES {
            EtaClassification::Late
        } else if minutes_remaining <= ON_TIME_CEILING_MINUTES {
            EtaClassification::OnTime
        } else {
            EtaClassification::EnRouteNormal
        };
        return Eta {
            arrival_estimate: Some(arrival_estimate),
            minutes_remaining: Some(minutes_remaining),
            classification,
        };
    }

    if let Some(scheduled) = order.scheduled_delivery {
        return Eta {
            arrival_estimate: Some(scheduled + travel),
            minutes_remaining: None,
            classification: EtaClassification::Scheduled,
        };
    }

    Eta {
        arrival_estimate: None,
        minutes_remaining: None,
        classification: EtaClassification::Unknown,
    }
}
