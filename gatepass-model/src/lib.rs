//! Core data model definitions shared across Gatepass crates.

pub mod ledger;
pub mod mode;
pub mod outcome;
pub mod participant;

pub use ledger::{LedgerCounts, ModeFilter, ScanLedger};
pub use mode::Mode;
pub use outcome::{ScanOutcome, ScanStatus};
pub use participant::{Participant, ParticipantStatus};
