//! Trait seam between the orchestration layer and the remote service.

use async_trait::async_trait;
use gatepass_model::{Mode, Participant};

use crate::api_types::RegistrationRecord;
use crate::error::ApiError;

/// The remote operations one scan attempt is driven with.
///
/// Implementations must always resolve: transport failures come back as
/// [`ApiError`] values, never as panics, and no call may outlive the
/// configured timeout.
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// Check a decoded code against the server without mutating state.
    async fn validate(&self, code: &str, mode: Mode) -> Result<Participant, ApiError>;

    /// Record an entry check-in.
    async fn register_entry(&self, code: &str) -> Result<RegistrationRecord, ApiError>;

    /// Record a passport delivery. Completes entry server-side as well; the
    /// caller never needs both calls.
    async fn register_delivery(&self, code: &str) -> Result<RegistrationRecord, ApiError>;
}
