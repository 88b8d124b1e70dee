//! Request and response shapes for the scan endpoint family.

use gatepass_model::Mode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Envelope every scan endpoint responds with.
///
/// `success` is the discriminant; HTTP status is not trusted over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

/// Failure payload: `{code, message}`, code occasionally absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Collapse the envelope into a discriminated result.
    ///
    /// An envelope that contradicts itself (`success` without data, or a
    /// failure without an error body) is treated as a malformed response.
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.success {
            return self.data.ok_or_else(ApiError::network);
        }
        match self.error {
            Some(body) => Err(ApiError {
                code: body.code,
                message: body.message,
            }),
            None => Err(ApiError::network()),
        }
    }
}

/// Body of `POST /validate`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateRequest<'a> {
    pub qr_code: &'a str,
    pub mode: Mode,
}

/// Body of the registration endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub qr_code: &'a str,
    /// ISO-8601 capture instant.
    pub scanned_at: String,
    /// Static identity of the scanning device/terminal.
    pub device_id: &'a str,
}

/// Success payload of a registration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub scan_id: String,
    pub participant_id: String,
    pub name: String,
    pub mode: String,
    pub timestamp: String,
    pub message: String,
}

/// One row of the history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub scan_id: String,
    pub participant_id: String,
    pub name: String,
    pub mode: String,
    pub timestamp: String,
    pub status: String,
}

/// Success payload of `GET /history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub total: u64,
    pub scans: Vec<HistoryEntry>,
}

/// Per-mode counters in the stats payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByMode {
    pub entrada: u64,
    pub entrega: u64,
    pub completo: u64,
    pub sorteo: u64,
}

/// Success payload of `GET /stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub date: String,
    pub total_scans: u64,
    pub by_mode: ByMode,
    pub valid_scans: u64,
    pub invalid_scans: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorteo_participants: Option<u64>,
    pub last_updated: String,
}
