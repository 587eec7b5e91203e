// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery rotation progress.
//!
//! Rotation progress is computed, not stored. It is a pure projection
//! over an order's milestone timestamps and status, used for progress
//! display only.

use crate::order::Order;
use serde::{Deserialize, Serialize};

/// The four rotation milestones, in order.
pub const ROTATION_MILESTONES: [&str; 4] = ["departure", "arrival", "signed", "return"];

/// The rotation progress of a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    /// Truck has departed the plant.
    pub departed: bool,
    /// Truck has arrived on site.
    pub arrived: bool,
    /// Delivery has been signed (status is `Delivered` or later).
    pub signed: bool,
    /// Truck has returned to the plant.
    pub returned: bool,
    /// Ordinal index (0-based) of the first incomplete milestone, or
    /// `None` once the rotation is complete.
    pub active_step: Option<usize>,
}

/// Computes the rotation progress for an order.
#[must_use]
pub fn rotation_progress(order: &Order) -> RotationState {
    let departed: bool = order.departure.is_some();
    let arrived: bool = order.arrival.is_some();
    let signed: bool = order.status.is_signed();
    let returned: bool = order.returned.is_some();

    let active_step: Option<usize> = [departed, arrived, signed, returned]
        .iter()
        .position(|done| !done);

    RotationState {
        departed,
        arrived,
        signed,
        returned,
        active_step,
    }
}
