// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client credit evaluation.
//!
//! The blacklist is an unconditional hard stop: no role, capability or
//! emergency flag opens a path past it inside this engine. The over-limit
//! check is advisory only and never blocks order creation.

use crate::types::{ClientRef, Money};
use serde::{Deserialize, Serialize};

/// A client's credit standing, read from the external client registry.
///
/// This profile is a read-only input; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCreditProfile {
    /// The client this profile belongs to.
    pub client: ClientRef,
    /// Unconditional hard stop on order creation when set.
    pub blacklisted: bool,
    /// Outstanding balance owed by the client.
    pub balance_due: Money,
    /// Per-client credit limit; the engine default applies when unset.
    pub credit_limit: Option<Money>,
}

/// A non-blocking credit warning, surfaced for human judgment only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditWarning {
    /// The client's outstanding balance.
    pub balance_due: Money,
    /// The limit the balance exceeds.
    pub credit_limit: Money,
    /// The total of the attempted order.
    pub attempted_total: Money,
}

/// The result of evaluating a client against an attempted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditAssessment {
    /// Hard stop: the client is blacklisted.
    pub blocked: bool,
    /// Advisory over-limit warning, if any.
    pub warning: Option<CreditWarning>,
}

/// Evaluates a client's credit profile against an attempted order total.
///
/// `blocked` fires iff the client is blacklisted. A warning fires iff the
/// outstanding balance exceeds the client's credit limit (or the engine
/// default when the client has none); it never prevents creation.
///
/// # Arguments
///
/// * `profile` - The client's credit profile
/// * `attempted_total` - The total of the order being attempted
/// * `default_limit` - The engine-wide default credit limit
#[must_use]
pub fn evaluate_credit(
    profile: &ClientCreditProfile,
    attempted_total: Money,
    default_limit: Money,
) -> CreditAssessment {
    if profile.blacklisted {
        return CreditAssessment {
            blocked: true,
            warning: None,
        };
    }

    let limit: Money = profile.credit_limit.unwrap_or(default_limit);
    let warning: Option<CreditWarning> = (profile.balance_due > limit).then(|| CreditWarning {
        balance_due: profile.balance_due,
        credit_limit: limit,
        attempted_total,
    });

    CreditAssessment {
        blocked: false,
        warning,
    }
}
