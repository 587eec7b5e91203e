// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collision-resistant identifier generation.
//!
//! Identifiers combine a coarse date component with a random suffix, so
//! that multiple dispatchers can create orders concurrently without a
//! shared counter. The store reports a suffix collision as a retryable
//! error; callers regenerate and retry insertion.

use betonflow_domain::{OrderId, QuoteId};
use chrono::{DateTime, Utc};

/// Generates a new order identifier, e.g. `BC-20260302-3F2A9C`.
///
/// # Arguments
///
/// * `now` - The caller's current wall-clock time (UTC)
#[must_use]
pub fn generate_order_id(now: DateTime<Utc>) -> OrderId {
    OrderId::new(&format!(
        "BC-{}-{:06X}",
        now.format("%Y%m%d"),
        rand::random::<u32>() & 0x00FF_FFFF
    ))
}

/// Generates a new quote identifier, e.g. `DV-20260302-3F2A9C`.
///
/// # Arguments
///
/// * `now` - The caller's current wall-clock time (UTC)
#[must_use]
pub fn generate_quote_id(now: DateTime<Utc>) -> QuoteId {
    QuoteId::new(&format!(
        "DV-{}-{:06X}",
        now.format("%Y%m%d"),
        rand::random::<u32>() & 0x00FF_FFFF
    ))
}
