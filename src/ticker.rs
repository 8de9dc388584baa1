use std::time::{Duration, Instant};

/// Decides when the next simulation step is due. It never fires more than
/// once per poll: if the caller falls behind, missed steps are dropped and
/// the schedule restarts from `now`.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker { interval, next_due: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Takes effect from the next scheduled step on.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.next_due {
            Some(due) if now >= due => due,
            _ => return false,
        };

        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }

    /// Time left until the next step, `None` while stopped.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
