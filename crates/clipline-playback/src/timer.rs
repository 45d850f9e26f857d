//! Polling timer for still-image display.

use std::time::Duration;

/// Result of polling an [`ImageTimer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerPoll {
    /// Not due for a check yet.
    NotDue,
    /// Checked; the image still has time left.
    Running { elapsed: f64 },
    /// Checked; the display duration has been reached.
    Elapsed,
}

/// Countdown for one image clip, checked at a fixed interval.
///
/// The timer holds no external resource: owning it is being armed, and
/// dropping it cancels it. Not `Clone`.
#[derive(Debug)]
pub struct ImageTimer {
    /// Clock reading (seconds) at which the image's local time was zero.
    started_at: f64,
    duration: f64,
    interval: Duration,
    next_poll: Duration,
}

impl ImageTimer {
    /// Arm a timer at `now` for an image that has already been on screen
    /// for `elapsed` seconds.
    pub fn arm(now: Duration, elapsed: f64, duration: f64, interval: Duration) -> Self {
        Self {
            started_at: now.as_secs_f64() - elapsed,
            duration,
            interval,
            next_poll: now + interval,
        }
    }

    /// Clock reading at which the image's local time was zero. May be
    /// negative when armed with a large `elapsed` early in a session.
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Seconds the image has been shown, capped at its duration.
    pub fn elapsed(&self, now: Duration) -> f64 {
        (now.as_secs_f64() - self.started_at).clamp(0.0, self.duration)
    }

    /// Move the image's local time to `elapsed` without re-arming.
    pub fn rebase(&mut self, now: Duration, elapsed: f64) {
        self.started_at = now.as_secs_f64() - elapsed;
    }

    /// Check the countdown if a tick interval has passed since the last check.
    pub fn poll(&mut self, now: Duration) -> TimerPoll {
        if now < self.next_poll {
            return TimerPoll::NotDue;
        }
        self.next_poll = now + self.interval;
        let elapsed = now.as_secs_f64() - self.started_at;
        if elapsed >= self.duration {
            TimerPoll::Elapsed
        } else {
            TimerPoll::Running { elapsed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(50);

    #[test]
    fn test_poll_respects_interval() {
        let mut timer = ImageTimer::arm(Duration::ZERO, 0.0, 3.0, TICK);
        assert_eq!(timer.poll(Duration::from_millis(10)), TimerPoll::NotDue);
        assert!(matches!(
            timer.poll(Duration::from_millis(50)),
            TimerPoll::Running { .. }
        ));
        // Next check only after another full interval.
        assert_eq!(timer.poll(Duration::from_millis(60)), TimerPoll::NotDue);
    }

    #[test]
    fn test_elapses_after_duration() {
        let mut timer = ImageTimer::arm(Duration::ZERO, 0.0, 3.0, TICK);
        assert!(matches!(
            timer.poll(Duration::from_millis(2_950)),
            TimerPoll::Running { .. }
        ));
        assert_eq!(timer.poll(Duration::from_millis(3_000)), TimerPoll::Elapsed);
    }

    #[test]
    fn test_arm_with_elapsed_offset() {
        let now = Duration::from_secs(10);
        let mut timer = ImageTimer::arm(now, 1.0, 3.0, TICK);
        assert_eq!(timer.started_at(), 9.0);
        assert_eq!(timer.elapsed(now), 1.0);
        assert_eq!(timer.poll(now + Duration::from_secs(2)), TimerPoll::Elapsed);
    }

    #[test]
    fn test_rebase_moves_local_time() {
        let mut timer = ImageTimer::arm(Duration::ZERO, 0.0, 3.0, TICK);
        let now = Duration::from_secs(2);
        timer.rebase(now, 0.5);
        assert_eq!(timer.elapsed(now), 0.5);
        assert_eq!(timer.elapsed(Duration::from_secs(60)), 3.0);
    }
}
