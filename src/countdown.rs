use std::time::Duration;

pub const DEFAULT_COOLDOWN_SECS: u32 = 60;

/// Resend cool-down. Ticks once per second; resend is available only when it
/// has run all the way down to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    cooldown: u32,
    remaining: u32,
    carry: Duration,
}

impl Countdown {
    pub fn new(cooldown_secs: u32) -> Self {
        Self {
            cooldown: cooldown_secs,
            remaining: 0,
            carry: Duration::ZERO,
        }
    }

    pub fn start(&mut self) {
        self.remaining = self.cooldown;
        self.carry = Duration::ZERO;
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
        self.carry = Duration::ZERO;
    }

    /// One second passed. Returns `true` when this tick reached zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    /// Applies wall-clock time, keeping the sub-second remainder for the
    /// next call.
    pub fn elapse(&mut self, elapsed: Duration) {
        if self.remaining == 0 {
            self.carry = Duration::ZERO;
            return;
        }
        let total = self.carry + elapsed;
        let whole = total.as_secs();
        self.carry = total - Duration::from_secs(whole);
        for _ in 0..whole {
            if self.tick() {
                self.carry = Duration::ZERO;
                break;
            }
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resend_enabled_exactly_at_zero() {
        let mut countdown = Countdown::default();
        countdown.start();
        assert_eq!(countdown.remaining(), 60);

        for tick in 1..60 {
            assert!(!countdown.tick(), "reached zero early at tick {tick}");
            assert!(!countdown.can_resend());
        }
        assert!(countdown.tick());
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.can_resend());
    }

    #[test]
    fn ticking_at_zero_stays_at_zero() {
        let mut countdown = Countdown::new(2);
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn elapse_carries_fractions() {
        let mut countdown = Countdown::new(3);
        countdown.start();
        countdown.elapse(Duration::from_millis(700));
        assert_eq!(countdown.remaining(), 3);
        countdown.elapse(Duration::from_millis(700));
        assert_eq!(countdown.remaining(), 2);
        countdown.elapse(Duration::from_secs(10));
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.can_resend());
    }

    #[test]
    fn clear_stops_the_timer() {
        let mut countdown = Countdown::new(60);
        countdown.start();
        countdown.tick();
        countdown.clear();
        assert!(!countdown.is_running());
        assert!(countdown.can_resend());
    }
}
