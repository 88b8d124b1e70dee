use crate::{Mode, ScanOutcome, ScanStatus};

/// Filter argument for [`ScanLedger::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFilter {
    /// Every recorded outcome, in original order.
    All,
    /// Only outcomes recorded under the given mode.
    Only(Mode),
}

impl ModeFilter {
    fn matches(self, mode: Mode) -> bool {
        match self {
            ModeFilter::All => true,
            ModeFilter::Only(wanted) => wanted == mode,
        }
    }
}

impl From<Mode> for ModeFilter {
    fn from(mode: Mode) -> Self {
        ModeFilter::Only(mode)
    }
}

/// Aggregate counters over the ledger.
///
/// Invariants: `valid + invalid == total` and `entrada + entrega == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerCounts {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub entrada: usize,
    pub entrega: usize,
}

impl LedgerCounts {
    /// Count recorded under `mode`.
    pub fn for_mode(&self, mode: Mode) -> usize {
        match mode {
            Mode::Entrada => self.entrada,
            Mode::Entrega => self.entrega,
        }
    }
}

/// Session-scoped, append-only sequence of scan outcomes.
///
/// Insertion order is preserved; the display layer reverses as needed. No
/// deduplication: scanning the same code twice records two entries. Appends
/// are serialized by the session driving them, so the ledger itself needs no
/// locking; consumers on other tasks read a [`ScanLedger::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct ScanLedger {
    entries: Vec<ScanOutcome>,
}

impl ScanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one outcome. O(1), preserves insertion order.
    pub fn append(&mut self, outcome: ScanOutcome) {
        self.entries.push(outcome);
    }

    /// Borrowing view of the outcomes matching `filter`, in original order.
    pub fn filter(&self, filter: ModeFilter) -> Vec<&ScanOutcome> {
        self.entries
            .iter()
            .filter(|outcome| filter.matches(outcome.mode))
            .collect()
    }

    pub fn counts(&self) -> LedgerCounts {
        let mut counts = LedgerCounts::default();
        for outcome in &self.entries {
            counts.total += 1;
            match outcome.status {
                ScanStatus::Valid => counts.valid += 1,
                ScanStatus::Invalid => counts.invalid += 1,
            }
            match outcome.mode {
                Mode::Entrada => counts.entrada += 1,
                Mode::Entrega => counts.entrega += 1,
            }
        }
        counts
    }

    /// Consistent copy for consumers running on another task (e.g. a display
    /// refresh), so reads never observe a torn in-progress append.
    pub fn snapshot(&self) -> Vec<ScanOutcome> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[ScanOutcome] {
        &self.entries
    }

    /// Most recently appended outcome, if any.
    pub fn latest(&self) -> Option<&ScanOutcome> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Session teardown only; outcomes are otherwise
    /// immutable for the life of the session.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn outcome(data: &str, status: ScanStatus, mode: Mode) -> ScanOutcome {
        match status {
            ScanStatus::Valid => ScanOutcome::valid(Utc::now(), data.into(), mode, "Ana".into()),
            ScanStatus::Invalid => ScanOutcome::invalid(Utc::now(), data.into(), mode, None),
        }
    }

    fn populated() -> ScanLedger {
        let mut ledger = ScanLedger::new();
        ledger.append(outcome("a", ScanStatus::Valid, Mode::Entrada));
        ledger.append(outcome("b", ScanStatus::Invalid, Mode::Entrada));
        ledger.append(outcome("c", ScanStatus::Valid, Mode::Entrega));
        ledger.append(outcome("d", ScanStatus::Invalid, Mode::Entrega));
        ledger.append(outcome("e", ScanStatus::Valid, Mode::Entrega));
        ledger
    }

    #[test]
    fn counts_partition_the_total() {
        let counts = populated().counts();
        assert_eq!(counts.total, 5);
        assert_eq!(counts.valid + counts.invalid, counts.total);
        assert_eq!(counts.entrada + counts.entrega, counts.total);
        assert_eq!(counts.for_mode(Mode::Entrada), 2);
        assert_eq!(counts.for_mode(Mode::Entrega), 3);
    }

    #[test]
    fn filter_by_mode_keeps_original_order() {
        let ledger = populated();
        let entrega: Vec<&str> = ledger
            .filter(Mode::Entrega.into())
            .iter()
            .map(|o| o.data.as_str())
            .collect();
        assert_eq!(entrega, ["c", "d", "e"]);
        assert!(
            ledger
                .filter(Mode::Entrega.into())
                .iter()
                .all(|o| o.mode == Mode::Entrega)
        );
    }

    #[test]
    fn filter_all_returns_every_entry_in_order() {
        let ledger = populated();
        let all: Vec<&str> = ledger
            .filter(ModeFilter::All)
            .iter()
            .map(|o| o.data.as_str())
            .collect();
        assert_eq!(all, ["a", "b", "c", "d", "e"]);
        // Filtering is a view; the ledger itself is untouched.
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn duplicate_codes_record_two_entries() {
        let mut ledger = ScanLedger::new();
        ledger.append(outcome("same", ScanStatus::Valid, Mode::Entrada));
        ledger.append(outcome("same", ScanStatus::Invalid, Mode::Entrada));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.latest().unwrap().status, ScanStatus::Invalid);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let mut ledger = populated();
        let snapshot = ledger.snapshot();
        ledger.append(outcome("f", ScanStatus::Valid, Mode::Entrada));
        assert_eq!(snapshot.len(), 5);
        assert_eq!(ledger.len(), 6);
    }

    #[test]
    fn clear_empties_the_session() {
        let mut ledger = populated();
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.counts(), LedgerCounts::default());
    }
}
