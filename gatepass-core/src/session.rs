//! Per-attempt scan state machine.
//!
//! One attempt runs `Idle → Validating → AwaitingConfirmation → Registering →
//! Complete`, with a direct shortcut to completion when validation fails and a
//! reset to `Idle` when the operator declines. Every path into completion
//! appends exactly one [`ScanOutcome`]; a cancelled confirmation appends
//! nothing.

use std::mem;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use gatepass_client::api_types::RegistrationRecord;
use gatepass_client::ScanApi;
use gatepass_model::{Mode, Participant, ScanLedger, ScanOutcome};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::prompt::{Decision, ScanPrompt};

/// A decode arriving within this window of the previously accepted one is
/// dropped, so a camera re-submitting the same burst does not start a second
/// attempt. The window opens when a decode is accepted, independent of how
/// long validation or registration take.
pub const SUPPRESSION_WINDOW: Duration = Duration::from_secs(2);

/// Result of feeding one decoded payload to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// Dropped: an attempt is already active, or the decode landed inside the
    /// suppression window. Nothing was recorded.
    Ignored,
    /// Validation failed; the attempt is complete and recorded.
    Completed {
        outcome: ScanOutcome,
        prompt: ScanPrompt,
    },
    /// Validation succeeded; the operator must resolve the prompt before the
    /// attempt continues.
    AwaitingDecision(ScanPrompt),
}

/// Result of resolving a pending confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// No confirmation was pending.
    Ignored,
    /// Operator declined or dismissed; nothing was recorded.
    Cancelled,
    /// Informational prompt acknowledged; nothing recorded, no call made.
    Acknowledged,
    /// Registration ran; the attempt is complete and recorded.
    Completed {
        outcome: ScanOutcome,
        prompt: ScanPrompt,
    },
}

#[derive(Debug)]
enum AttemptState {
    Idle,
    Validating,
    AwaitingConfirmation(Pending),
    Registering,
}

#[derive(Debug)]
struct Pending {
    code: String,
    captured_at: DateTime<Utc>,
    participant: Participant,
    /// True when `can_scan` allowed a registration to follow acceptance.
    registrable: bool,
}

/// Session context for one scanning device: the current mode, the ledger, and
/// the state of the attempt in flight.
///
/// At-most-one attempt is active at a time: decode events arriving while the
/// state is not idle are dropped, not queued.
#[derive(Debug)]
pub struct ScanSession<A, C = SystemClock> {
    api: A,
    clock: C,
    mode: Mode,
    ledger: ScanLedger,
    state: AttemptState,
    last_accepted: Option<DateTime<Utc>>,
}

impl<A: ScanApi> ScanSession<A, SystemClock> {
    /// Create a session running on the wall clock.
    pub fn new(api: A, mode: Mode) -> Self {
        Self::with_clock(api, SystemClock, mode)
    }
}

impl<A: ScanApi, C: Clock> ScanSession<A, C> {
    pub fn with_clock(api: A, clock: C, mode: Mode) -> Self {
        ScanSession {
            api,
            clock,
            mode,
            ledger: ScanLedger::new(),
            state: AttemptState::Idle,
            last_accepted: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch the active mode. Only honored between attempts; returns whether
    /// the switch took effect.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if !matches!(self.state, AttemptState::Idle) {
            debug!("[ScanSession] mode switch ignored: attempt in progress");
            return false;
        }
        self.mode = mode;
        true
    }

    pub fn ledger(&self) -> &ScanLedger {
        &self.ledger
    }

    /// Drop the session's recorded outcomes. External operator action.
    pub fn clear_ledger(&mut self) {
        self.ledger.clear();
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, AttemptState::Idle)
    }

    /// Whether a confirmation prompt is waiting on the operator.
    pub fn is_awaiting_decision(&self) -> bool {
        matches!(self.state, AttemptState::AwaitingConfirmation(_))
    }

    /// Feed one decoded payload from the capture device.
    ///
    /// Re-entrant decodes are dropped while an attempt is active, as are
    /// decodes inside the suppression window. Otherwise the code is validated
    /// and the attempt either completes as invalid or suspends awaiting the
    /// operator's decision.
    pub async fn handle_decode(&mut self, raw: &str) -> DecodeOutcome {
        if !matches!(self.state, AttemptState::Idle) {
            debug!("[ScanSession] decode dropped: attempt in progress");
            return DecodeOutcome::Ignored;
        }

        let now = self.clock.now();
        if self.within_suppression_window(now) {
            debug!("[ScanSession] decode dropped: inside suppression window");
            return DecodeOutcome::Ignored;
        }

        self.last_accepted = Some(now);
        self.state = AttemptState::Validating;
        info!("[ScanSession] validating code in mode {}", self.mode);

        match self.api.validate(raw, self.mode).await {
            Ok(participant) => {
                let prompt = self.confirmation_prompt(&participant);
                let registrable = participant.can_scan;
                self.state = AttemptState::AwaitingConfirmation(Pending {
                    code: raw.to_string(),
                    captured_at: now,
                    participant,
                    registrable,
                });
                DecodeOutcome::AwaitingDecision(prompt)
            }
            Err(err) => {
                warn!(
                    "[ScanSession] validation failed: {}",
                    err.code.as_deref().unwrap_or("UNKNOWN_ERROR")
                );
                let outcome = ScanOutcome::invalid(now, raw.to_string(), self.mode, None);
                self.ledger.append(outcome.clone());
                self.state = AttemptState::Idle;
                DecodeOutcome::Completed {
                    outcome,
                    prompt: ScanPrompt::info("Error de Validación", err.user_message()),
                }
            }
        }
    }

    /// Resolve the pending confirmation with the operator's decision.
    ///
    /// Declining or dismissing resets the attempt without a record. Accepting
    /// an informational prompt acknowledges it, again without a record or a
    /// registration call. Accepting a registrable prompt invokes the mode's
    /// registration endpoint and completes the attempt either way.
    pub async fn resolve(&mut self, decision: Decision) -> ConfirmOutcome {
        let pending = match mem::replace(&mut self.state, AttemptState::Idle) {
            AttemptState::AwaitingConfirmation(pending) => pending,
            other => {
                self.state = other;
                debug!("[ScanSession] decision ignored: no confirmation pending");
                return ConfirmOutcome::Ignored;
            }
        };

        match decision {
            Decision::Declined | Decision::Dismissed => {
                debug!("[ScanSession] confirmation cancelled by operator");
                ConfirmOutcome::Cancelled
            }
            Decision::Accepted if !pending.registrable => {
                debug!("[ScanSession] informational prompt acknowledged");
                ConfirmOutcome::Acknowledged
            }
            Decision::Accepted => {
                self.state = AttemptState::Registering;
                let result = match self.mode {
                    Mode::Entrada => self.api.register_entry(&pending.code).await,
                    Mode::Entrega => self.api.register_delivery(&pending.code).await,
                };
                self.state = AttemptState::Idle;
                self.complete_registration(pending, result)
            }
        }
    }

    fn complete_registration(
        &mut self,
        pending: Pending,
        result: Result<RegistrationRecord, gatepass_client::ApiError>,
    ) -> ConfirmOutcome {
        match result {
            Ok(record) => {
                info!(
                    "[ScanSession] {} registered for {}",
                    self.mode, record.name
                );
                let outcome = ScanOutcome::valid(
                    pending.captured_at,
                    pending.code,
                    self.mode,
                    record.name.clone(),
                );
                self.ledger.append(outcome.clone());
                let message = format!(
                    "{}\n\nParticipante: {}\nHora: {}",
                    record.message,
                    record.name,
                    format_registration_time(&record.timestamp)
                );
                ConfirmOutcome::Completed {
                    outcome,
                    prompt: ScanPrompt::info("Registro Exitoso", message),
                }
            }
            Err(err) => {
                warn!(
                    "[ScanSession] registration failed: {}",
                    err.code.as_deref().unwrap_or("UNKNOWN_ERROR")
                );
                // The participant was identified during validation, so this
                // record carries the name a validation-stage failure lacks.
                let outcome = ScanOutcome::invalid(
                    pending.captured_at,
                    pending.code,
                    self.mode,
                    Some(pending.participant.name),
                );
                self.ledger.append(outcome.clone());
                ConfirmOutcome::Completed {
                    outcome,
                    prompt: ScanPrompt::info("Error al Registrar", err.user_message()),
                }
            }
        }
    }

    fn confirmation_prompt(&self, participant: &Participant) -> ScanPrompt {
        if participant.can_scan {
            let action = match self.mode {
                Mode::Entrada => "registrar la entrada",
                Mode::Entrega => "registrar la entrega del pasaporte",
            };
            return ScanPrompt::confirm(
                "Participante Encontrado",
                format!(
                    "{}\n{}\n\n¿Deseas {}?",
                    participant.name, participant.email, action
                ),
                "Registrar",
            );
        }

        if participant.already_scanned(self.mode) {
            let (title, detail) = match self.mode {
                Mode::Entrada => (
                    "Entrada Ya Registrada",
                    "Esta persona ya registró su entrada al evento anteriormente.",
                ),
                Mode::Entrega => (
                    "Pasaporte Ya Entregado",
                    "Esta persona ya recibió su pasaporte anteriormente.",
                ),
            };
            return ScanPrompt::info(title, format!("{}\n\n{}", participant.name, detail));
        }

        ScanPrompt::info(
            "Participante Encontrado",
            format!(
                "{}\n{}\n\n{}",
                participant.name, participant.email, participant.message
            ),
        )
    }

    fn within_suppression_window(&self, now: DateTime<Utc>) -> bool {
        let Some(last) = self.last_accepted else {
            return false;
        };
        let window = TimeDelta::from_std(SUPPRESSION_WINDOW).unwrap_or(TimeDelta::zero());
        now.signed_duration_since(last) < window
    }
}

/// Render a server timestamp for the success prompt, `dd/mm/yyyy, HH:MM`.
/// Unparseable values pass through untouched.
fn format_registration_time(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%d/%m/%Y, %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
