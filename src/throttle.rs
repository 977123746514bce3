use instant::{Duration, Instant};

/// Lets an action through at most once per `period`.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    period: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// `true` on the first call and whenever `period` has elapsed since the
    /// last call that returned `true`.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(t) if now.duration_since(t) < self.period => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Make the next `ready` call succeed.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
