use chrono::{Local, NaiveDateTime, Timelike};

/// Source of "now" for stored timestamps.
///
/// Implementations return local wall-clock time truncated to whole seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<NaiveDateTime>>,
}

#[cfg(test)]
impl ManualClock {
    /// Start at the given `YYYY-MM-DDTHH:MM:SS` time.
    pub fn at(timestamp: &str) -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::Mutex::new(parse(timestamp))),
        }
    }

    pub fn set(&self, timestamp: &str) {
        *self.now.lock().unwrap() = parse(timestamp);
    }
}

#[cfg(test)]
fn parse(timestamp: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(timestamp, crate::core::models::log_entry::TIMESTAMP_FORMAT)
        .unwrap()
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_has_second_precision() {
        assert_eq!(SystemClock.now().nanosecond(), 0);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::at("2025-11-01T09:00:00");
        let handle = clock.clone();
        handle.set("2025-11-02T10:00:00");
        assert_eq!(
            clock.now().format("%Y-%m-%d %H:%M:%S").to_string(),
            "2025-11-02 10:00:00"
        );
    }
}
