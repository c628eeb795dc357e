//! Frame clock
//!
//! The frame driver reads a [`ClockSource`] exactly once per tick, so every body
//! in a frame is evaluated at the same instant. Timestamps are milliseconds since
//! an arbitrary epoch and never decrease.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Milliseconds since the clock's epoch.
pub type Timestamp = f64;

/// Supplies one timestamp per frame.
pub trait ClockSource {
    /// Current time in milliseconds. Successive calls never go backwards.
    fn now(&mut self) -> Timestamp;
}

#[derive(Debug, Clone, Copy)]
enum Epoch {
    Unix,
    Session(Instant),
}

/// Wall-clock time source.
///
/// [`SystemClock::unix`] reports milliseconds since the Unix epoch, so a fresh
/// launch shows the planets where the current date puts them in the scaled model.
/// [`SystemClock::since_start`] counts from construction instead.
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Epoch,
    last: Timestamp,
}

impl SystemClock {
    pub fn unix() -> Self {
        Self {
            epoch: Epoch::Unix,
            last: 0.0,
        }
    }

    pub fn since_start() -> Self {
        Self {
            epoch: Epoch::Session(Instant::now()),
            last: 0.0,
        }
    }

    fn read(&self) -> Timestamp {
        match self.epoch {
            Epoch::Unix => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
                .unwrap_or(0.0),
            Epoch::Session(start) => start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::unix()
    }
}

impl ClockSource for SystemClock {
    fn now(&mut self) -> Timestamp {
        // Wall clocks can be stepped backwards by NTP; hold the last value instead.
        let reading = self.read();
        if reading > self.last {
            self.last = reading;
        }
        self.last
    }
}

/// Hand-driven clock for tests and headless stepping.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current: Timestamp,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self { current: start }
    }

    /// Moves the clock to `t`. Earlier values are ignored.
    pub fn set(&mut self, t: Timestamp) {
        if t > self.current {
            self.current = t;
        }
    }

    /// Advances the clock by `delta_ms`. Negative steps are ignored.
    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.current += delta_ms;
        }
    }

    pub fn current(&self) -> Timestamp {
        self.current
    }
}

impl ClockSource for ManualClock {
    fn now(&mut self) -> Timestamp {
        self.current
    }
}

impl<C: ClockSource + ?Sized> ClockSource for Box<C> {
    fn now(&mut self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_never_goes_backwards() {
        let mut clock = ManualClock::new(1000.0);
        clock.set(500.0);
        assert_eq!(clock.now(), 1000.0);

        clock.advance(-250.0);
        assert_eq!(clock.now(), 1000.0);

        clock.advance(16.0);
        clock.set(2000.0);
        assert_eq!(clock.now(), 2000.0);
    }

    #[test]
    fn system_clocks_are_monotonic() {
        let mut unix = SystemClock::unix();
        let mut session = SystemClock::since_start();

        let (mut last_unix, mut last_session) = (unix.now(), session.now());
        for _ in 0..100 {
            let (u, s) = (unix.now(), session.now());
            assert!(u >= last_unix);
            assert!(s >= last_session);
            last_unix = u;
            last_session = s;
        }
    }

    #[test]
    fn unix_clock_reports_epoch_milliseconds() {
        let mut clock = SystemClock::unix();
        // Any date after 2020-01-01 in milliseconds.
        assert!(clock.now() > 1_577_836_800_000.0);
    }
}
