//! Scan orchestration: the state machine driving one scan attempt from raw
//! decoded text to a recorded ledger entry.
//!
//! A [`ScanSession`](session::ScanSession) owns the session ledger and the
//! current mode, and enforces at-most-one in-flight attempt by construction.
//! Network calls go through the [`ScanApi`](gatepass_client::ScanApi) seam;
//! time goes through the [`Clock`](clock::Clock) seam so the decode
//! suppression window is testable without real delays.

pub mod clock;
pub mod prompt;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use prompt::{Decision, PromptKind, ScanPrompt};
pub use session::{ConfirmOutcome, DecodeOutcome, ScanSession, SUPPRESSION_WINDOW};
