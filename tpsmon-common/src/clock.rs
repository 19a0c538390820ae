//! Wall-clock abstraction so date defaulting stays testable

use chrono::{Duration, Local, NaiveDate};

/// Source of "today" for computing default collection dates.
pub trait Clock {
    fn today(&self) -> NaiveDate;

    /// The default target date for collection and reporting
    fn yesterday(&self) -> NaiveDate {
        self.today() - Duration::days(1)
    }
}

/// Clock backed by the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
