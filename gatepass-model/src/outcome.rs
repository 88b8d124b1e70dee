use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Mode;

/// Whether a completed scan attempt ended in a confirmed registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// A confirmed registration call returned success.
    Valid,
    /// Validation failed, the server declined the registration, or the call
    /// never reached the server.
    Invalid,
}

/// One recorded result of a completed scan attempt.
///
/// Created exactly once per attempt that reaches completion; a cancelled
/// confirmation leaves no record. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Locally generated, time-ordered by creation.
    pub id: Uuid,
    /// Wall-clock at decode acceptance, 24-hour `HH:MM:SS`.
    pub timestamp: String,
    /// Raw decoded text exactly as the capture device delivered it.
    pub data: String,
    pub status: ScanStatus,
    pub mode: Mode,
    /// Present only when the server identified the participant before the
    /// attempt completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ScanOutcome {
    /// Record a confirmed registration.
    pub fn valid(captured_at: DateTime<Utc>, data: String, mode: Mode, name: String) -> Self {
        Self::record(captured_at, data, ScanStatus::Valid, mode, Some(name))
    }

    /// Record a failed attempt. `name` is present only when validation had
    /// already identified the participant.
    pub fn invalid(
        captured_at: DateTime<Utc>,
        data: String,
        mode: Mode,
        name: Option<String>,
    ) -> Self {
        Self::record(captured_at, data, ScanStatus::Invalid, mode, name)
    }

    fn record(
        captured_at: DateTime<Utc>,
        data: String,
        status: ScanStatus,
        mode: Mode,
        name: Option<String>,
    ) -> Self {
        ScanOutcome {
            id: Uuid::now_v7(),
            timestamp: captured_at.format("%H:%M:%S").to_string(),
            data,
            status,
            mode,
            name,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ScanStatus::Valid
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamp_is_24_hour_wall_clock() {
        let captured = Utc.with_ymd_and_hms(2024, 1, 1, 15, 4, 5).unwrap();
        let outcome = ScanOutcome::valid(captured, "QR123".into(), Mode::Entrada, "Ana".into());
        assert_eq!(outcome.timestamp, "15:04:05");
        assert!(outcome.is_valid());
    }

    #[test]
    fn ids_are_ordered_by_creation() {
        let captured = Utc::now();
        let first = ScanOutcome::invalid(captured, "a".into(), Mode::Entrada, None);
        let second = ScanOutcome::invalid(captured, "b".into(), Mode::Entrada, None);
        assert!(first.id < second.id);
    }

    #[test]
    fn invalid_outcome_may_carry_a_known_name() {
        let outcome = ScanOutcome::invalid(
            Utc::now(),
            "QR9".into(),
            Mode::Entrega,
            Some("Luis".into()),
        );
        assert_eq!(outcome.status, ScanStatus::Invalid);
        assert_eq!(outcome.name.as_deref(), Some("Luis"));
    }
}
