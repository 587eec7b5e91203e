// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an actor is permitted to perform
//! without leaking engine internals. They are advisory only and do not
//! replace the engine's own checks: every handler re-validates through
//! the role table and the approval gate.

use crate::request_response::{Capability, DispatchCapabilities};
use betonflow_domain::ActorContext;

/// Computes the advisory capabilities of an actor.
///
/// # Arguments
///
/// * `actor` - The acting party
/// * `in_window` - Whether the actor's clock is inside the emergency window
#[must_use]
pub const fn compute_capabilities(
    actor: &ActorContext,
    in_window: bool,
) -> DispatchCapabilities {
    let role = actor.role;
    DispatchCapabilities {
        can_create_quote: Capability::from_bool(role.can_create_quote()),
        can_approve_quote: Capability::from_bool(role.can_approve_quote()),
        can_create_order: Capability::from_bool(role.can_create_order()),
        can_validate_price: Capability::from_bool(role.can_validate_price()),
        can_advance_rotation: Capability::from_bool(role.can_advance_rotation()),
        can_invoice: Capability::from_bool(role.can_invoice()),
        can_cancel: Capability::from_bool(role.can_cancel()),
        can_use_emergency_bypass: Capability::from_bool(
            role.is_emergency_eligible() && actor.can_bypass_emergency && in_window,
        ),
    }
}
