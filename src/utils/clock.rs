use chrono::{DateTime, NaiveDate, Utc};

/// Represents an entity responsible for providing dates across the
/// application. This can allow it to be used for testing.
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.time().date_naive()
    }
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
