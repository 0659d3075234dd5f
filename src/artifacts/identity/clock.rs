use crate::errors::{Error, Result};
use chrono::{DateTime, FixedOffset};
use derive_new::new;

const AUTHOR_DATE_VAR: &str = "GIT_AUTHOR_DATE";

pub trait Clock {
    /// Current instant together with the local UTC offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        chrono::Local::now().fixed_offset()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy, new)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>,
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}

/// Parse an author date in RFC 2822 or `%Y-%m-%d %H:%M:%S %z` form
pub fn parse_author_date(date: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(date)
        .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
        .map_err(|_| Error::InvalidArgument(format!("unparseable author date {:?}", date)))
}

/// A `FixedClock` when `GIT_AUTHOR_DATE` is set, the system clock otherwise
pub fn clock_from_env() -> Result<Box<dyn Clock>> {
    match std::env::var(AUTHOR_DATE_VAR) {
        Ok(date) => Ok(Box::new(FixedClock::new(parse_author_date(&date)?))),
        Err(_) => Ok(Box::new(SystemClock)),
    }
}
