use std::time::{Duration, Instant};

/// A single logical timer. Time is passed in rather than read, so the caller
/// decides what "now" is.
///
/// Firing consumes the pending tick. The next one is only scheduled when the caller
/// re-arms, which is how a changed interval ends up applying to the following tick
/// and never to one already pending.
#[derive(Debug, Default)]
pub struct TickScheduler {
    next_tick: Option<Instant>,
}

impl TickScheduler {
    pub fn new() -> Self {
        TickScheduler { next_tick: None }
    }

    pub fn arm(&mut self, now: Instant, interval: Duration) {
        self.next_tick = Some(now + interval);
    }

    pub fn disarm(&mut self) {
        self.next_tick = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                self.next_tick = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_tick.map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn idle_scheduler_never_fires() {
        let mut scheduler = TickScheduler::new();
        let now = Instant::now();

        assert!(!scheduler.is_armed());
        assert!(!scheduler.fire(now + MS * 1000));
        assert_eq!(scheduler.time_until_next(now), None);
    }

    #[test]
    fn fires_once_at_deadline() {
        let mut scheduler = TickScheduler::new();
        let start = Instant::now();
        scheduler.arm(start, MS * 100);

        assert!(!scheduler.fire(start + MS * 99));
        assert_eq!(scheduler.time_until_next(start + MS * 40), Some(MS * 60));

        assert!(scheduler.fire(start + MS * 100));
        assert!(!scheduler.is_armed());
        assert!(!scheduler.fire(start + MS * 200));
    }

    #[test]
    fn overdue_tick_reports_zero_wait() {
        let mut scheduler = TickScheduler::new();
        let start = Instant::now();
        scheduler.arm(start, MS * 10);

        assert_eq!(scheduler.time_until_next(start + MS * 50), Some(Duration::from_millis(0)));
    }

    #[test]
    fn disarm_cancels_pending_tick() {
        let mut scheduler = TickScheduler::new();
        let start = Instant::now();
        scheduler.arm(start, MS * 10);
        scheduler.disarm();

        assert!(!scheduler.fire(start + MS * 10));
    }

    #[test]
    fn rearming_uses_new_interval_from_now() {
        let mut scheduler = TickScheduler::new();
        let start = Instant::now();
        scheduler.arm(start, MS * 100);
        assert!(scheduler.fire(start + MS * 100));

        scheduler.arm(start + MS * 100, MS * 90);
        assert!(!scheduler.fire(start + MS * 189));
        assert!(scheduler.fire(start + MS * 190));
    }
}
