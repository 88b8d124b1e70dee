use serde::{Deserialize, Serialize};

use crate::Mode;

/// Per-stage completion flags the server reports for a participant.
///
/// These are display material only. Whether a registration call may be
/// attempted is decided exclusively by [`Participant::can_scan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStatus {
    pub entrada: bool,
    pub entrega: bool,
    pub completo: bool,
    pub sorteo: bool,
}

/// The person identified by a scanned code, as known to the remote service.
///
/// Read-only on the client; every field comes straight off the validation
/// response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub participant_id: String,
    pub name: String,
    pub email: String,
    pub registration_date: String,
    pub status: ParticipantStatus,
    /// Authoritative gate: a registration call may only follow when true.
    pub can_scan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible_for_sorteo: Option<bool>,
    /// Human-readable explanation supplied by the server.
    pub message: String,
}

impl Participant {
    /// Whether the stage targeted by `mode` is already recorded for this
    /// participant. Used only to pick the wording of an informational prompt.
    pub fn already_scanned(&self, mode: Mode) -> bool {
        match mode {
            Mode::Entrada => self.status.entrada,
            Mode::Entrega => self.status.entrega,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(can_scan: bool, status: ParticipantStatus) -> Participant {
        Participant {
            participant_id: "P-001".into(),
            name: "Ana Torres".into(),
            email: "ana@example.com".into(),
            registration_date: "2024-01-01".into(),
            status,
            can_scan,
            eligible_for_sorteo: None,
            message: "OK".into(),
        }
    }

    #[test]
    fn already_scanned_follows_the_mode_flag() {
        let participant = sample(
            false,
            ParticipantStatus {
                entrada: true,
                ..ParticipantStatus::default()
            },
        );
        assert!(participant.already_scanned(Mode::Entrada));
        assert!(!participant.already_scanned(Mode::Entrega));
    }

    #[test]
    fn deserializes_without_optional_sorteo_field() {
        let json = r#"{
            "participant_id": "P-002",
            "name": "Luis",
            "email": "luis@example.com",
            "registration_date": "2024-01-02",
            "status": {"entrada": false, "entrega": false, "completo": false, "sorteo": false},
            "can_scan": true,
            "message": "Puede escanear"
        }"#;
        let participant: Participant = serde_json::from_str(json).unwrap();
        assert!(participant.can_scan);
        assert_eq!(participant.eligible_for_sorteo, None);
    }
}
