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

//! API boundary layer for the BetonFlow dispatch engine.
//!
//! Handlers orchestrate the pure core against the storage port and the
//! audit/alert sinks: credit check, approval gate, identifier-collision
//! retry, compare-and-swap transitions, and best-effort alert fan-out.
//! Domain and core errors are translated explicitly into the API error
//! contract so that calling UIs can render precise, role-appropriate
//! messages.

mod capabilities;
mod config;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use capabilities::compute_capabilities;
pub use config::{ConfigError, EngineConfig};
pub use error::{ApiError, translate_core_error, translate_domain_error, translate_store_error};
pub use handlers::{
    approve_quote, convert_quote, create_order, create_quote, estimate_eta, record_quality_check,
    record_return, reject_quote, rotation_progress, submit_quote, transition_order,
};
pub use request_response::{
    Capability, ConvertQuoteRequest, CreateOrderRequest, CreateOrderResponse, CreateQuoteRequest,
    DispatchCapabilities, OrderResponse, QuoteResponse, TransitionAction, TransitionOrderRequest,
};
