use chrono::{DateTime, Utc};

/// Source of the request-time "now" that splits shows into past and upcoming.
///
/// Handlers read it once per request so every query in that request agrees.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
