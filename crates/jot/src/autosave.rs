#![forbid(unsafe_code)]

use std::time::Duration;

use web_time::Instant;

/// Decides when the next periodic session save is due.
///
/// The timer holds no thread; the host asks [`is_due`](Self::is_due) from
/// its event loop and calls [`mark_saved`](Self::mark_saved) after saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveTimer {
    interval: Option<Duration>,
    last_save: Instant,
}

impl AutosaveTimer {
    /// Timer that first fires `interval` after `now`. `None` never fires.
    #[must_use]
    pub fn new(interval: Option<Duration>, now: Instant) -> Self {
        Self {
            interval,
            last_save: now,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// When the next save is due, if autosave is on.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.interval.map(|interval| self.last_save + interval)
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due().is_some_and(|due| now >= due)
    }

    pub fn mark_saved(&mut self, now: Instant) {
        self.last_save = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_interval() {
        let start = Instant::now();
        let mut timer = AutosaveTimer::new(Some(Duration::from_secs(30)), start);
        assert!(!timer.is_due(start + Duration::from_secs(29)));
        assert!(timer.is_due(start + Duration::from_secs(30)));

        timer.mark_saved(start + Duration::from_secs(31));
        assert!(!timer.is_due(start + Duration::from_secs(60)));
        assert_eq!(timer.next_due(), Some(start + Duration::from_secs(61)));
    }

    #[test]
    fn disabled_never_fires() {
        let start = Instant::now();
        let timer = AutosaveTimer::new(None, start);
        assert!(!timer.is_due(start + Duration::from_secs(3600)));
        assert_eq!(timer.next_due(), None);
    }
}
