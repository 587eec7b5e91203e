// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API tests.

use crate::config::EngineConfig;
use crate::request_response::CreateOrderRequest;
use betonflow_audit::{Alert, AlertDeliveryError, AlertSink, MemoryAlertSink, MemoryAuditSink};
use betonflow_domain::{
    ActorContext, ClientCreditProfile, ClientRef, EmergencyWindow, Money, Role, ZoneTravelModel,
};
use betonflow_store::InMemoryOrderStore;
use chrono::{DateTime, TimeZone, Utc};

/// A test rig: store, sinks and configuration.
pub struct Rig {
    pub store: InMemoryOrderStore,
    pub audit: MemoryAuditSink,
    pub alerts: MemoryAlertSink,
    pub config: EngineConfig,
}

pub fn rig() -> Rig {
    Rig {
        store: InMemoryOrderStore::new(),
        audit: MemoryAuditSink::new(),
        alerts: MemoryAlertSink::new(),
        config: EngineConfig {
            emergency_window: EmergencyWindow::new("UTC", 18).unwrap(),
            zones: ZoneTravelModel::new(&[("Z-NORD", 25)], 30),
            ..EngineConfig::default()
        },
    }
}

/// An alert sink that refuses every delivery.
#[derive(Debug, Default)]
pub struct FailingAlertSink;

impl AlertSink for FailingAlertSink {
    fn deliver(&mut self, _alert: &Alert) -> Result<(), AlertDeliveryError> {
        Err(AlertDeliveryError {
            reason: String::from("notification relay unreachable"),
        })
    }
}

/// 14:00 UTC: outside the emergency window.
pub fn afternoon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 14, 0, 0).unwrap()
}

/// 21:00 UTC: inside the emergency window.
pub fn night() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 21, 0, 0).unwrap()
}

pub fn actor_at(role: Role, now: DateTime<Utc>) -> ActorContext {
    ActorContext::new(format!("{role}-1"), role, false, now)
}

pub fn actor(role: Role) -> ActorContext {
    actor_at(role, afternoon())
}

pub fn directeur_with_bypass(now: DateTime<Utc>) -> ActorContext {
    ActorContext::new(String::from("do-1"), Role::DirecteurOperations, true, now)
}

pub fn clean_profile() -> ClientCreditProfile {
    ClientCreditProfile {
        client: ClientRef::new("CL-001"),
        blacklisted: false,
        balance_due: Money::ZERO,
        credit_limit: None,
    }
}

pub fn blacklisted_profile() -> ClientCreditProfile {
    ClientCreditProfile {
        blacklisted: true,
        ..clean_profile()
    }
}

pub fn request() -> CreateOrderRequest {
    CreateOrderRequest {
        client: String::from("CL-001"),
        formula: String::from("B25"),
        volume_m3: 8.0,
        price_per_m3: 850.0,
        zone: String::from("Z-NORD"),
        zone_surcharge: Money::from_centimes(5_000),
        scheduled_delivery: None,
        transport: None,
        justification: None,
    }
}

/// A valid emergency justification (well past the 10-character minimum).
pub const NIGHT_REASON: &str = "Client chantier urgent, coulage nocturne";
