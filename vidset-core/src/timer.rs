//! Cooperative timers driven by the host's update loop.
//!
//! Nothing here spawns threads or sleeps. The host calls `poll` with the
//! current instant once per frame and reacts to whatever came due.

use std::time::{Duration, Instant};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Interval between countdown ticks.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Fires at a fixed interval until cancelled.
#[derive(Debug)]
pub struct RepeatingTimer {
    interval: Duration,
    next_fire: Instant,
    cancelled: bool,
}

impl RepeatingTimer {
    /// Start a timer whose first firing is one `interval` after `now`.
    pub fn start(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        Self {
            interval,
            next_fire: now + interval,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Number of firings that came due since the last poll.
    ///
    /// Always `0` once cancelled, even for firings that were already due.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.is_cancelled() {
            return 0;
        }

        let mut fired = 0;
        while now >= self.next_fire {
            fired += 1;
            self.next_fire += self.interval;
        }
        fired
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// One interval elapsed; this many remain.
    Tick(u32),
    /// The count reached zero. Emitted once.
    Finished,
}

/// Counts down whole intervals and reports each step.
#[derive(Debug)]
pub struct Countdown {
    remaining: u32,
    timer: RepeatingTimer,
    finished: bool,
}

impl Countdown {
    /// A countdown of `seconds` one-second ticks.
    pub fn start(seconds: u32, now: Instant) -> Self {
        Self::with_interval(seconds, COUNTDOWN_TICK, now)
    }

    pub fn with_interval(count: u32, interval: Duration, now: Instant) -> Self {
        Self {
            remaining: count,
            timer: RepeatingTimer::start(interval, now),
            finished: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.timer.is_cancelled()
    }

    /// Events that came due since the last poll, oldest first.
    ///
    /// A countdown started at zero finishes on its first poll.
    pub fn poll(&mut self, now: Instant) -> Vec<CountdownEvent> {
        if self.finished || self.is_cancelled() {
            return Vec::new();
        }

        if self.remaining == 0 {
            self.finish();
            return vec![CountdownEvent::Finished];
        }

        let mut events = Vec::new();
        for _ in 0..self.timer.poll(now) {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.finish();
                events.push(CountdownEvent::Finished);
                break;
            }
            events.push(CountdownEvent::Tick(self.remaining));
        }
        events
    }

    fn finish(&mut self) {
        self.finished = true;
        self.timer.cancel();
    }
}
