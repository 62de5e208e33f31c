//! Elapsed-time state machine.
//!
//! The engine never reads a clock or schedules anything on its own. Callers
//! pass the current reading into `start` and `tick`, and whoever drives the
//! frame loop decides when to call `tick` again.

use log::debug;

use crate::Millis;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    /// Nothing accumulated and not running.
    Idle,
    Running,
    /// Stopped with time on the clock.
    Paused,
}

/// Elapsed time and running flag at one instant.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Snapshot {
    pub elapsed: Millis,
    pub running: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TimerEngine {
    running: bool,
    start_epoch: Millis,
    elapsed: Millis,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin or resume accumulating. No-op while already running.
    ///
    /// The epoch is pushed back by whatever is already on the clock so that
    /// `now - start_epoch` picks up where the last run stopped.
    pub fn start(&mut self, now: Millis) {
        if self.running {
            return;
        }
        self.start_epoch = now - self.elapsed;
        self.running = true;
        debug!("engine: running from epoch {:.3} ({:.3} ms carried)", self.start_epoch, self.elapsed);
    }

    /// Stop accumulating, freezing elapsed at the last ticked value.
    pub fn pause(&mut self) {
        if self.running {
            debug!("engine: paused at {:.3} ms", self.elapsed);
        }
        self.running = false;
    }

    pub fn clear(&mut self) {
        self.pause();
        self.start_epoch = 0.0;
        self.elapsed = 0.0;
        debug!("engine: cleared");
    }

    /// Put `elapsed` on a stopped clock, as if it had been paused there.
    /// Ignored while running.
    pub fn restore(&mut self, elapsed: Millis) {
        if self.running {
            return;
        }
        self.start_epoch = 0.0;
        self.elapsed = elapsed.max(0.0);
        debug!("engine: restored to {:.3} ms", self.elapsed);
    }

    /// Recompute elapsed from `now` and return it.
    ///
    /// A tick that arrives after `pause` or `clear` changes nothing and just
    /// reports the frozen value. Elapsed never moves backwards, even if the
    /// reading does.
    pub fn tick(&mut self, now: Millis) -> Millis {
        if self.running {
            self.elapsed = (now - self.start_epoch).max(self.elapsed).max(0.0);
        }
        self.elapsed
    }

    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.elapsed > 0.0 {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elapsed: self.elapsed,
            running: self.running,
        }
    }
}
