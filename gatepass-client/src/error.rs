//! Error taxonomy shared by every scan endpoint, plus the fixed table of
//! operator-facing messages.

use thiserror::Error;

/// Server-reported rejection codes, parsed from their wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Transport failure: unreachable host, timeout, undecodable body.
    NetworkError,
    /// The code does not exist.
    InvalidQr,
    /// The code exists but is no longer usable.
    ExpiredQr,
    /// Already scanned in the requested mode.
    AlreadyScanned,
    /// Entry was already recorded for this participant.
    AlreadyEntered,
    /// Delivery requested before entry was recorded.
    NotEntered,
    /// A stage that requires the passport to have been delivered first.
    PassportNotDelivered,
    /// The server did not recognize the requested mode.
    InvalidMode,
    ServerError,
    Unauthorized,
    /// Fallback for codes this client does not know.
    UnknownError,
}

impl ErrorCode {
    /// Parse a wire code. Unknown strings collapse to [`ErrorCode::UnknownError`].
    pub fn parse(code: &str) -> Self {
        match code {
            "NETWORK_ERROR" => ErrorCode::NetworkError,
            "INVALID_QR" => ErrorCode::InvalidQr,
            "EXPIRED_QR" => ErrorCode::ExpiredQr,
            "ALREADY_SCANNED" => ErrorCode::AlreadyScanned,
            "ALREADY_ENTERED" => ErrorCode::AlreadyEntered,
            "NOT_ENTERED" => ErrorCode::NotEntered,
            "PASSPORT_NOT_DELIVERED" => ErrorCode::PassportNotDelivered,
            "INVALID_MODE" => ErrorCode::InvalidMode,
            "SERVER_ERROR" => ErrorCode::ServerError,
            "UNAUTHORIZED" => ErrorCode::Unauthorized,
            _ => ErrorCode::UnknownError,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::InvalidQr => "INVALID_QR",
            ErrorCode::ExpiredQr => "EXPIRED_QR",
            ErrorCode::AlreadyScanned => "ALREADY_SCANNED",
            ErrorCode::AlreadyEntered => "ALREADY_ENTERED",
            ErrorCode::NotEntered => "NOT_ENTERED",
            ErrorCode::PassportNotDelivered => "PASSPORT_NOT_DELIVERED",
            ErrorCode::InvalidMode => "INVALID_MODE",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
        }
    }

    /// Operator-facing message for this code. Pure and deterministic.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorCode::NetworkError => {
                "No se pudo conectar con el servidor. Verifica tu conexión."
            }
            ErrorCode::InvalidQr => "Código QR no válido o no existe.",
            ErrorCode::ExpiredQr => "El código QR ha expirado.",
            ErrorCode::AlreadyScanned => "Este QR ya fue escaneado en este modo.",
            ErrorCode::AlreadyEntered => "Ya se registró la entrada para este participante.",
            ErrorCode::NotEntered => "El participante debe registrar entrada primero.",
            ErrorCode::PassportNotDelivered => "El pasaporte no ha sido entregado.",
            ErrorCode::InvalidMode => "Modo de escaneo no válido.",
            ErrorCode::ServerError => "Error interno del servidor. Intenta de nuevo.",
            ErrorCode::Unauthorized => "No autorizado.",
            ErrorCode::UnknownError => "Ocurrió un error desconocido.",
        }
    }
}

/// Map an optional wire code to its operator-facing message.
///
/// Absent and unrecognized codes both yield the fixed unknown-error message.
pub fn user_message(code: Option<&str>) -> &'static str {
    match code {
        Some(code) => ErrorCode::parse(code).user_message(),
        None => ErrorCode::UnknownError.user_message(),
    }
}

/// Failure result of a scan API call.
///
/// `code` is the server-supplied value when one was present; transport-level
/// failures carry `NETWORK_ERROR`. `message` is the server's text, kept for
/// logging; presentation goes through [`user_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {message}", .code.as_deref().unwrap_or("UNKNOWN_ERROR"))]
pub struct ApiError {
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// Transport-level failure: unreachable host, timeout, undecodable body.
    pub fn network() -> Self {
        ApiError {
            code: Some(ErrorCode::NetworkError.as_str().to_string()),
            message: ErrorCode::NetworkError.user_message().to_string(),
        }
    }

    /// Typed view of the wire code.
    pub fn error_code(&self) -> ErrorCode {
        self.code
            .as_deref()
            .map_or(ErrorCode::UnknownError, ErrorCode::parse)
    }

    /// Message fit for the operator, drawn from the fixed table.
    pub fn user_message(&self) -> &'static str {
        user_message(self.code.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_their_fixed_message() {
        assert_eq!(
            user_message(Some("INVALID_QR")),
            "Código QR no válido o no existe."
        );
        assert_eq!(
            user_message(Some("NOT_ENTERED")),
            "El participante debe registrar entrada primero."
        );
    }

    #[test]
    fn mapping_is_idempotent() {
        let first = user_message(Some("ALREADY_SCANNED"));
        let second = user_message(Some("ALREADY_SCANNED"));
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_and_absent_codes_fall_back() {
        let fallback = ErrorCode::UnknownError.user_message();
        assert_eq!(user_message(Some("SOMETHING_NEW")), fallback);
        assert_eq!(user_message(None), fallback);
    }

    #[test]
    fn wire_codes_round_trip() {
        for code in [
            "NETWORK_ERROR",
            "INVALID_QR",
            "EXPIRED_QR",
            "ALREADY_SCANNED",
            "ALREADY_ENTERED",
            "NOT_ENTERED",
            "PASSPORT_NOT_DELIVERED",
            "INVALID_MODE",
            "SERVER_ERROR",
            "UNAUTHORIZED",
        ] {
            assert_eq!(ErrorCode::parse(code).as_str(), code);
        }
    }

    #[test]
    fn network_error_carries_the_connectivity_message() {
        let err = ApiError::network();
        assert_eq!(err.error_code(), ErrorCode::NetworkError);
        assert_eq!(
            err.user_message(),
            "No se pudo conectar con el servidor. Verifica tu conexión."
        );
    }
}
