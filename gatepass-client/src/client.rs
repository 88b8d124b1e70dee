//! `reqwest`-backed implementation of the scan API contract.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use gatepass_model::{Mode, Participant};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::ScanApi;
use crate::api_types::{
    ApiResponse, HistoryPage, RegisterRequest, RegistrationRecord, Stats, ValidateRequest,
};
use crate::error::ApiError;
use crate::routes;

/// History page size used when the caller has no preference.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Connection settings for the scan endpoint family.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://192.168.1.80:3003`.
    pub base_url: String,
    /// Static identity of this scanning device/terminal, sent with every
    /// registration call.
    pub device_id: String,
    /// Upper bound per network call. Exceeding it resolves the call as a
    /// `NETWORK_ERROR`, never leaves the caller suspended.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://localhost:3003".to_string(),
            device_id: "mobile-app-001".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Typed client for the scan endpoints.
#[derive(Debug, Clone)]
pub struct ScanClient {
    client: Client,
    base_url: String,
    device_id: String,
}

impl ScanClient {
    /// Create a new scan client.
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        debug!(
            "[ScanClient] created for base URL {} as device {}",
            config.base_url, config.device_id
        );

        ScanClient {
            client,
            base_url: config.base_url,
            device_id: config.device_id,
        }
    }

    /// Build a scan API URL.
    pub fn build_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            routes::API_BASE,
            path
        )
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured device identity.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Execute a POST and collapse the envelope into a discriminated result.
    async fn post_scan<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.build_url(path);
        debug!("[ScanClient] POST {url}");

        let response = match self.client.post(&url).json(body).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("[ScanClient] transport failure for {url}: {err}");
                return Err(ApiError::network());
            }
        };

        Self::decode(url, response).await
    }

    /// Execute a GET with query pairs and collapse the envelope.
    async fn get_scan<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(path);
        debug!("[ScanClient] GET {url}");

        let response = match self.client.get(&url).query(query).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("[ScanClient] transport failure for {url}: {err}");
                return Err(ApiError::network());
            }
        };

        Self::decode(url, response).await
    }

    async fn decode<T>(url: String, response: reqwest::Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        // The envelope's `success` flag is the discriminant; error payloads
        // arrive with non-2xx statuses too, so the body is decoded regardless.
        let envelope: ApiResponse<T> = match response.json().await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!("[ScanClient] undecodable response from {url}: {err}");
                return Err(ApiError::network());
            }
        };
        envelope.into_result()
    }

    async fn register(&self, route: &str, code: &str) -> Result<RegistrationRecord, ApiError> {
        let body = RegisterRequest {
            qr_code: code,
            scanned_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            device_id: &self.device_id,
        };
        self.post_scan(route, &body).await
    }

    /// Check a decoded code against the server. Does not mutate server state.
    pub async fn validate(&self, code: &str, mode: Mode) -> Result<Participant, ApiError> {
        let body = ValidateRequest {
            qr_code: code,
            mode,
        };
        self.post_scan(routes::scan::VALIDATE, &body).await
    }

    /// Record an entry check-in.
    pub async fn register_entry(&self, code: &str) -> Result<RegistrationRecord, ApiError> {
        self.register(routes::scan::ENTRADA, code).await
    }

    /// Record a passport delivery.
    pub async fn register_delivery(&self, code: &str) -> Result<RegistrationRecord, ApiError> {
        self.register(routes::scan::ENTREGA, code).await
    }

    /// Record a completed passport.
    pub async fn register_completo(&self, code: &str) -> Result<RegistrationRecord, ApiError> {
        self.register(routes::scan::COMPLETO, code).await
    }

    /// Record raffle participation.
    pub async fn register_sorteo(&self, code: &str) -> Result<RegistrationRecord, ApiError> {
        self.register(routes::scan::SORTEO, code).await
    }

    /// Fetch recent scans, optionally restricted to one mode. A `None` limit
    /// falls back to [`DEFAULT_HISTORY_LIMIT`].
    pub async fn fetch_history(
        &self,
        mode: Option<Mode>,
        limit: Option<u32>,
    ) -> Result<HistoryPage, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::with_capacity(2);
        if let Some(mode) = mode {
            query.push(("mode", mode.as_str().to_string()));
        }
        query.push(("limit", limit.unwrap_or(DEFAULT_HISTORY_LIMIT).to_string()));
        self.get_scan(routes::scan::HISTORY, &query).await
    }

    /// Fetch the aggregate counters for the day.
    pub async fn fetch_stats(&self) -> Result<Stats, ApiError> {
        self.get_scan(routes::scan::STATS, &[]).await
    }
}

#[async_trait]
impl ScanApi for ScanClient {
    async fn validate(&self, code: &str, mode: Mode) -> Result<Participant, ApiError> {
        ScanClient::validate(self, code, mode).await
    }

    async fn register_entry(&self, code: &str) -> Result<RegistrationRecord, ApiError> {
        ScanClient::register_entry(self, code).await
    }

    async fn register_delivery(&self, code: &str) -> Result<RegistrationRecord, ApiError> {
        ScanClient::register_delivery(self, code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_the_scan_prefix() {
        let client = ScanClient::new(ClientConfig {
            base_url: "http://192.168.1.80:3003".into(),
            ..ClientConfig::default()
        });
        assert_eq!(
            client.build_url(routes::scan::VALIDATE),
            "http://192.168.1.80:3003/api/scan/validate"
        );
        assert_eq!(
            client.build_url(routes::scan::ENTREGA),
            "http://192.168.1.80:3003/api/scan/entrega"
        );
    }

    #[test]
    fn every_registration_stage_has_its_own_route() {
        let client = ScanClient::new(ClientConfig::default());
        assert_eq!(
            client.build_url(routes::scan::ENTRADA),
            "http://localhost:3003/api/scan/entrada"
        );
        assert_eq!(
            client.build_url(routes::scan::COMPLETO),
            "http://localhost:3003/api/scan/completo"
        );
        assert_eq!(
            client.build_url(routes::scan::SORTEO),
            "http://localhost:3003/api/scan/sorteo"
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let client = ScanClient::new(ClientConfig {
            base_url: "http://localhost:3003/".into(),
            ..ClientConfig::default()
        });
        assert_eq!(
            client.build_url(routes::scan::STATS),
            "http://localhost:3003/api/scan/stats"
        );
    }

    #[test]
    fn default_config_matches_the_deployment_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.device_id, "mobile-app-001");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn unreachable_host_resolves_as_network_error() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let client = ScanClient::new(ClientConfig {
            base_url: "http://192.0.2.1:9".into(),
            timeout: Duration::from_millis(250),
            ..ClientConfig::default()
        });
        let err = client.validate("QR123", Mode::Entrada).await.unwrap_err();
        assert_eq!(err.code.as_deref(), Some("NETWORK_ERROR"));
    }

    #[tokio::test]
    async fn completo_and_sorteo_registrations_fold_transport_failures_too() {
        let client = ScanClient::new(ClientConfig {
            base_url: "http://192.0.2.1:9".into(),
            timeout: Duration::from_millis(250),
            ..ClientConfig::default()
        });
        let err = client.register_completo("QR123").await.unwrap_err();
        assert_eq!(err.code.as_deref(), Some("NETWORK_ERROR"));
        let err = client.register_sorteo("QR123").await.unwrap_err();
        assert_eq!(err.code.as_deref(), Some("NETWORK_ERROR"));
    }
}
