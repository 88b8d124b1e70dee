use chrono::{DateTime, Utc};

/// Time source for a scan session.
///
/// Injected so the decode suppression window can be exercised in tests by
/// advancing a manual clock instead of sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
