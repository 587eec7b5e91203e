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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod actor;
mod credit;
mod emergency_window;
mod error;
mod eta;
mod order;
mod order_status;
mod pricing;
mod quote;
mod rotation;
mod types;
mod validation;
mod zone_travel;

#[cfg(test)]
mod tests;

pub use actor::{ActorContext, Role};
pub use credit::{ClientCreditProfile, CreditAssessment, CreditWarning, evaluate_credit};
pub use emergency_window::{DEFAULT_WINDOW_START_HOUR, EmergencyWindow};
pub use error::DomainError;
pub use eta::{Eta, EtaClassification, estimate_eta};
pub use order::Order;
pub use order_status::OrderStatus;
pub use pricing::compute_total;
pub use quote::{Quote, QuoteStatus};
pub use rotation::{ROTATION_MILESTONES, RotationState, rotation_progress};
pub use types::{
    ClientRef, FormulaRef, Money, OrderId, PaymentMode, QuoteId, TransportResource, ZoneRef,
};
pub use validation::{
    JUSTIFICATION_MIN_LEN, validate_justification, validate_reference, validate_unit_price,
    validate_volume,
};
pub use zone_travel::{DEFAULT_TRAVEL_MINUTES, ZoneTravelModel};
