// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The nightly emergency-approval window.
//!
//! During the window, the operations director may bypass price validation
//! with a mandatory justification and alert fan-out. The window is defined
//! in the plant's declared timezone and closes at midnight.
//!
//! ## Invariants
//!
//! - The window is `[start_hour, 24:00)` plant-local wall-clock, daily.
//! - Evaluation is pure: the instant to test is always supplied by the
//!   caller, never read from a live clock.
//! - A UTC caller timestamp cannot skew the gate: the instant is converted
//!   to the declared timezone before the hour test.

use crate::error::DomainError;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Default start hour of the emergency window (18:00 plant-local).
pub const DEFAULT_WINDOW_START_HOUR: u8 = 18;

/// The plant's nightly emergency window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyWindow {
    /// IANA timezone the plant's wall clock runs in.
    timezone: String,
    /// Plant-local hour at which the window opens.
    start_hour: u8,
}

impl EmergencyWindow {
    /// Creates a new `EmergencyWindow`.
    ///
    /// # Arguments
    ///
    /// * `timezone` - IANA timezone identifier (e.g. "Africa/Algiers")
    /// * `start_hour` - Plant-local opening hour (0-23)
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone is not a valid IANA identifier or
    /// the start hour is out of range.
    pub fn new(timezone: &str, start_hour: u8) -> Result<Self, DomainError> {
        timezone
            .parse::<Tz>()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_owned()))?;
        if start_hour > 23 {
            return Err(DomainError::InvalidWindowHour(start_hour));
        }
        Ok(Self {
            timezone: timezone.to_owned(),
            start_hour,
        })
    }

    /// Returns the declared timezone identifier.
    #[must_use]
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Returns the plant-local opening hour.
    #[must_use]
    pub const fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// Answers "is this instant inside the emergency window?".
    ///
    /// # Arguments
    ///
    /// * `now` - The instant to test (UTC)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the stored timezone no
    /// longer parses (possible only for records deserialized from an
    /// untrusted source, since the constructor validates it).
    pub fn contains(&self, now: DateTime<Utc>) -> Result<bool, DomainError> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(self.timezone.clone()))?;
        let local_hour: u32 = now.with_timezone(&tz).hour();
        Ok(local_hour >= u32::from(self.start_hour))
    }
}

impl Default for EmergencyWindow {
    fn default() -> Self {
        Self {
            timezone: String::from("UTC"),
            start_hour: DEFAULT_WINDOW_START_HOUR,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc_window() -> EmergencyWindow {
        EmergencyWindow::new("UTC", DEFAULT_WINDOW_START_HOUR).unwrap()
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_afternoon_is_outside() {
        assert!(!utc_window().contains(at(14, 0)).unwrap());
    }

    #[test]
    fn test_evening_is_inside() {
        assert!(utc_window().contains(at(21, 0)).unwrap());
    }

    #[test]
    fn test_open_boundary_is_inside() {
        assert!(utc_window().contains(at(18, 0)).unwrap());
    }

    #[test]
    fn test_last_minute_is_inside() {
        assert!(utc_window().contains(at(23, 59)).unwrap());
    }

    #[test]
    fn test_midnight_is_outside() {
        assert!(!utc_window().contains(at(0, 0)).unwrap());
    }

    #[test]
    fn test_declared_timezone_governs_the_gate() {
        // 17:30 UTC is 18:30 in Paris during winter: inside the window for
        // a Paris plant, outside for a UTC plant.
        let paris = EmergencyWindow::new("Europe/Paris", DEFAULT_WINDOW_START_HOUR).unwrap();
        let instant = Utc.with_ymd_and_hms(2026, 1, 15, 17, 30, 0).unwrap();

        assert!(paris.contains(instant).unwrap());
        assert!(!utc_window().contains(instant).unwrap());
    }

    #[test]
    fn test_invalid_timezone_is_rejected() {
        let err = EmergencyWindow::new("Mars/Olympus", 18).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimezone(_)));
    }

    #[test]
    fn test_invalid_start_hour_is_rejected() {
        let err = EmergencyWindow::new("UTC", 24).unwrap_err();
        assert!(matches!(err, DomainError::InvalidWindowHour(24)));
    }
}
