// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order total computation.
//!
//! `total = volume × price_per_m3 + zone_surcharge`, rounded half-up to
//! centimes. Rounding happens exactly once, on the volume × price product;
//! the surcharge is already an integer amount of centimes.

use crate::error::DomainError;
use crate::types::Money;
use crate::validation::{validate_unit_price, validate_volume};

/// Computes an order or quote total.
///
/// # Arguments
///
/// * `volume_m3` - Ordered volume in cubic meters (strictly positive)
/// * `price_per_m3` - Unit price in major currency units (non-negative)
/// * `zone_surcharge` - Flat delivery surcharge for the zone
///
/// # Returns
///
/// The rounded total as `Money`.
///
/// # Errors
///
/// Returns a validation error when volume or price are out of range, and
/// `DomainError::AmountOverflow` when the product leaves the representable
/// range.
pub fn compute_total(
    volume_m3: f64,
    price_per_m3: f64,
    zone_surcharge: Money,
) -> Result<Money, DomainError> {
    validate_volume(volume_m3)?;
    validate_unit_price(price_per_m3)?;

    let line_major: f64 = volume_m3 * price_per_m3;
    let line: Money = round_half_up_to_centimes(line_major)?;
    line.checked_add(zone_surcharge)
}

/// Rounds a non-negative amount in major units half-up to integer centimes.
fn round_half_up_to_centimes(amount_major: f64) -> Result<Money, DomainError> {
    if !amount_major.is_finite() {
        return Err(DomainError::AmountOverflow {
            operation: String::from("computing the volume times unit-price product"),
        });
    }
    let scaled: f64 = (amount_major * 100.0 + 0.5).floor();
    // i64::MAX centimes is far beyond any plausible order total; beyond it
    // the cast would wrap.
    #[allow(clippy::cast_precision_loss)]
    if scaled >= i64::MAX as f64 || scaled < 0.0 {
        return Err(DomainError::AmountOverflow {
            operation: format!("rounding {amount_major} to centimes"),
        });
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(Money::from_centimes(scaled as i64))
}
