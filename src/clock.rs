use web_time::{Duration, Instant};

/// Cooperative time source polled by the search.
///
/// Implementations must be monotonic: once `is_exhausted` reports `true` it
/// keeps doing so until the next `restart`.
pub trait Clock {
    /// Starts a new budget window.
    fn restart(&mut self);

    fn is_exhausted(&mut self) -> bool;
}

/// Wall-clock budget measured from the last `restart`.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn new(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Clock for Deadline {
    fn restart(&mut self) {
        self.started = Instant::now();
    }

    fn is_exhausted(&mut self) -> bool {
        self.started.elapsed() >= self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_budget_is_exhausted_immediately() {
        let mut clock = Deadline::new(Duration::ZERO);
        clock.restart();

        assert!(clock.is_exhausted());
    }

    #[test]
    fn generous_budget_is_not_exhausted() {
        let mut clock = Deadline::new(Duration::from_secs(3600));
        clock.restart();

        assert!(!clock.is_exhausted());
        assert!(clock.elapsed() < clock.budget());
    }

    #[test]
    fn restart_opens_a_new_window() {
        let mut clock = Deadline::new(Duration::from_millis(5));
        clock.started = Instant::now() - Duration::from_millis(10);
        assert!(clock.is_exhausted());

        clock.budget = Duration::from_secs(3600);
        clock.restart();
        assert!(!clock.is_exhausted());
    }
}
