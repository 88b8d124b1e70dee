use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Which check-in stage a scan attempt targets.
///
/// The mode is selected by the operator before scanning begins and stays
/// fixed for the lifetime of an attempt. It decides which registration
/// endpoint a confirmed scan is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Event entry check-in.
    Entrada,
    /// Passport delivery to a participant already inside.
    Entrega,
}

impl Mode {
    /// Wire name, as the server expects it in request bodies and queries.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Entrada => "entrada",
            Mode::Entrega => "entrega",
        }
    }

    /// Operator-facing label for the active mode badge.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Entrada => "CONTROL DE ENTRADA",
            Mode::Entrega => "ENTREGA DE PASAPORTE",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&Mode::Entrada).unwrap(), "\"entrada\"");
        assert_eq!(serde_json::to_string(&Mode::Entrega).unwrap(), "\"entrega\"");
    }

    #[test]
    fn round_trips_from_wire_names() {
        let mode: Mode = serde_json::from_str("\"entrega\"").unwrap();
        assert_eq!(mode, Mode::Entrega);
        assert_eq!(mode.to_string(), "entrega");
    }
}
