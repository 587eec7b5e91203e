// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::ZoneRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Expected travel minutes for a zone the model does not know.
pub const DEFAULT_TRAVEL_MINUTES: u32 = 30;

/// Expected one-way travel minutes per delivery zone code.
///
/// The table is a configuration input; zone codes the model does not
/// carry fall back to [`DEFAULT_TRAVEL_MINUTES`]. Lookup is by the
/// normalized (uppercase) zone code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTravelModel {
    /// Travel minutes keyed by zone code.
    minutes_by_zone: HashMap<String, u32>,
    /// Fallback for unknown zones.
    default_minutes: u32,
}

impl ZoneTravelModel {
    /// Creates a model from explicit entries.
    ///
    /// # Arguments
    ///
    /// * `entries` - `(zone code, minutes)` pairs; codes are normalized
    /// * `default_minutes` - Fallback for unknown zones
    #[must_use]
    pub fn new(entries: &[(&str, u32)], default_minutes: u32) -> Self {
        let minutes_by_zone: HashMap<String, u32> = entries
            .iter()
            .map(|(code, minutes)| (ZoneRef::new(code).value().to_owned(), *minutes))
            .collect();
        Self {
            minutes_by_zone,
            default_minutes,
        }
    }

    /// Returns the expected travel minutes for a zone.
    #[must_use]
    pub fn travel_minutes(&self, zone: &ZoneRef) -> u32 {
        self.minutes_by_zone
            .get(zone.value())
            .copied()
            .unwrap_or(self.default_minutes)
    }
}

impl Default for ZoneTravelModel {
    /// The default rotation footprint of a single-plant operation: urban
    /// core, first ring, and two remote work-site corridors.
    fn default() -> Self {
        Self::new(
            &[
                ("Z-CENTRE", 20),
                ("Z-NORD", 25),
                ("Z-SUD", 25),
                ("Z-EST", 35),
                ("Z-OUEST", 40),
            ],
            DEFAULT_TRAVEL_MINUTES,
        )
    }
}
