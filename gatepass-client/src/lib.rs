//! Typed contract over the four-endpoint scan API.
//!
//! Every operation resolves to an explicit [`Result`]; transport failures,
//! timeouts and undecodable bodies never escape as panics or raw errors but
//! fold into an [`ApiError`] with the `NETWORK_ERROR` code.

pub mod api;
pub mod api_types;
pub mod client;
pub mod error;
pub mod routes;

pub use api::ScanApi;
pub use api_types::{
    ApiResponse, ByMode, ErrorBody, HistoryEntry, HistoryPage, RegisterRequest,
    RegistrationRecord, Stats, ValidateRequest,
};
pub use client::{ClientConfig, ScanClient, DEFAULT_HISTORY_LIMIT};
pub use error::{user_message, ApiError, ErrorCode};
