//! Route constants for the scan API.
//!
//! All scan routes are prefixed with `/api/scan`.

/// Base path for the scan endpoint family.
pub const API_BASE: &str = "/api/scan";

/// Scan endpoints.
pub mod scan {
    /// QR validation. Read-only server-side.
    pub const VALIDATE: &str = "/validate";
    /// Entry registration.
    pub const ENTRADA: &str = "/entrada";
    /// Passport delivery registration. Completes entry server-side as well.
    pub const ENTREGA: &str = "/entrega";
    /// Completed-passport registration.
    pub const COMPLETO: &str = "/completo";
    /// Raffle participation registration.
    pub const SORTEO: &str = "/sorteo";
    /// Recent scans, filterable by mode.
    pub const HISTORY: &str = "/history";
    /// Aggregate counters for the day.
    pub const STATS: &str = "/stats";
}
