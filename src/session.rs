//! The per-page controller: one engine, one ledger, one clock.
//!
//! Everything that mutates timing state goes through here. Renderers read
//! poses and control state out of it and never touch the engine directly.

use log::{debug, info, warn};

use crate::clock::{Clock, PerformanceClock};
use crate::controls::ControlState;
use crate::dial::DialPose;
use crate::engine::{TimerEngine, TimerState};
use crate::error::ChronosError;
use crate::ledger::{read_lap_log, LapLedger, LapRecord};
use crate::Millis;

/// Banner shown above the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Fresh or just cleared.
    Ready,
    Engaged,
    /// Paused with time on the clock.
    Idle,
}

#[derive(Debug)]
pub struct Session<C: Clock = PerformanceClock> {
    clock: C,
    engine: TimerEngine,
    ledger: LapLedger,
    status: Status,
}

impl Default for Session<PerformanceClock> {
    fn default() -> Self {
        Self::new(PerformanceClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            engine: TimerEngine::new(),
            ledger: LapLedger::new(),
            status: Status::Ready,
        }
    }

    pub fn start(&mut self) {
        if self.engine.is_running() {
            return;
        }
        self.engine.start(self.clock.now());
        self.status = Status::Engaged;
        info!("session: started at {:.3} ms", self.engine.elapsed());
    }

    pub fn pause(&mut self) {
        let was_running = self.engine.is_running();
        self.engine.pause();
        self.status = Status::Idle;
        if was_running {
            info!("session: paused at {:.3} ms", self.engine.elapsed());
        }
    }

    /// Stop, zero the clock and drop every lap.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.ledger.clear();
        self.status = Status::Ready;
        info!("session: cleared");
    }

    /// Advance elapsed from the clock. Does nothing unless running.
    pub fn tick(&mut self) -> Millis {
        if !self.engine.is_running() {
            return self.engine.elapsed();
        }
        self.engine.tick(self.clock.now())
    }

    /// Record a split at the current elapsed time.
    pub fn lap(&mut self) -> Option<LapRecord> {
        self.tick();
        self.ledger.record_lap(self.engine.snapshot())
    }

    /// The flight log as CSV, or `EmptyLedger` when no lap was taken.
    pub fn export_csv(&self) -> Result<String, ChronosError> {
        if self.ledger.is_empty() {
            warn!("session: export skipped, no laps recorded");
            return Err(ChronosError::EmptyLedger);
        }
        let csv = self.ledger.to_csv()?;
        debug!("session: exported {} laps ({} bytes)", self.ledger.len(), csv.len());
        Ok(csv)
    }

    /// Reload an exported flight log: its laps replace the ledger and the
    /// clock is left paused at the last lap's total. Returns the lap count.
    ///
    /// Refused while running. Nothing changes if the log is rejected.
    pub fn restore_log(&mut self, csv_content: &str) -> Result<usize, ChronosError> {
        if self.engine.is_running() {
            warn!("session: restore refused while running");
            return Err(ChronosError::Running);
        }

        let laps = read_lap_log(csv_content)?;
        let mut ledger = LapLedger::new();
        ledger.restore(laps)?;
        let total = ledger.laps().last().map(|l| l.cumulative).unwrap_or(0.0);

        self.ledger = ledger;
        self.engine.clear();
        self.engine.restore(total);
        self.status = if total > 0.0 { Status::Idle } else { Status::Ready };
        info!("session: restored {} laps, clock at {:.3} ms", self.ledger.len(), total);
        Ok(self.ledger.len())
    }

    pub fn elapsed(&self) -> Millis {
        self.engine.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Backdrop warp effect runs while the clock does.
    pub fn warp_active(&self) -> bool {
        self.engine.is_running()
    }

    pub fn ledger(&self) -> &LapLedger {
        &self.ledger
    }

    pub fn controls(&self) -> ControlState {
        ControlState::derive(self.engine.snapshot(), self.ledger.is_empty())
    }

    pub fn dial(&self) -> DialPose {
        DialPose::from_elapsed(self.engine.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::rc::Rc;

    fn session_at(start: Millis) -> (Rc<ManualClock>, Session<Rc<ManualClock>>) {
        let clock = Rc::new(ManualClock::new(start));
        (clock.clone(), Session::new(clock))
    }

    #[test]
    fn tick_scenario_drives_hand() {
        let (clock, mut s) = session_at(0.0);
        s.start();
        clock.set(1500.0);
        assert_eq!(s.tick(), 1500.0);
        assert_eq!(s.dial().hand_degrees, 9.0);
        assert_eq!(s.status(), Status::Engaged);
    }

    #[test]
    fn lap_scenario_records_splits() {
        let (clock, mut s) = session_at(0.0);
        s.start();

        clock.set(2000.0);
        let first = s.lap().unwrap();
        assert_eq!((first.sequence, first.interval, first.cumulative), (1, 2000.0, 2000.0));

        clock.set(5000.0);
        let second = s.lap().unwrap();
        assert_eq!((second.sequence, second.interval, second.cumulative), (2, 3000.0, 5000.0));
    }

    #[test]
    fn lap_before_start_is_ignored() {
        let (clock, mut s) = session_at(0.0);
        clock.set(800.0);
        assert!(s.lap().is_none());
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn lap_while_paused_uses_frozen_time() {
        let (clock, mut s) = session_at(0.0);
        s.start();
        clock.set(1200.0);
        s.tick();
        s.pause();
        clock.set(9000.0);
        assert_eq!(s.lap().unwrap().cumulative, 1200.0);
    }

    #[test]
    fn clear_resets_everything_from_any_state() {
        let (clock, mut s) = session_at(50.0);
        s.clear();
        assert_eq!(s.elapsed(), 0.0);

        s.start();
        clock.advance(3000.0);
        s.lap();
        s.clear();
        assert_eq!(s.elapsed(), 0.0);
        assert!(!s.is_running());
        assert!(s.ledger().is_empty());
        assert_eq!(s.state(), TimerState::Idle);
        assert_eq!(s.status(), Status::Ready);

        s.start();
        clock.advance(100.0);
        s.pause();
        s.clear();
        assert_eq!(s.elapsed(), 0.0);
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn pause_then_start_resumes() {
        let (clock, mut s) = session_at(0.0);
        s.start();
        clock.set(4000.0);
        s.tick();
        s.pause();
        let before = s.elapsed();

        clock.set(60_000.0);
        s.start();
        assert_eq!(s.tick(), before);
        assert!(s.warp_active());
    }

    #[test]
    fn stale_tick_after_pause_does_not_resurrect() {
        let (clock, mut s) = session_at(0.0);
        s.start();
        clock.set(500.0);
        s.tick();
        s.pause();
        clock.set(10_000.0);
        assert_eq!(s.tick(), 500.0);
        assert!(!s.is_running());
    }

    #[test]
    fn export_requires_laps() {
        let (clock, mut s) = session_at(0.0);
        assert!(matches!(s.export_csv(), Err(ChronosError::EmptyLedger)));
        assert!(s.controls().export_disabled);

        s.start();
        clock.set(61_005.0);
        s.lap();
        assert!(!s.controls().export_disabled);
        assert_eq!(s.export_csv().unwrap(), "Lap,Interval,Total\n1,01:01.00,01:01.00\n");
    }

    #[test]
    fn clear_on_fresh_session_stays_ready() {
        let (_clock, mut s) = session_at(0.0);
        s.clear();
        assert_eq!(s.status(), Status::Ready);
        assert_eq!(s.state(), TimerState::Idle);
    }

    #[test]
    fn restore_log_resumes_where_export_left_off() {
        let (clock, mut s) = session_at(0.0);
        s.start();
        clock.set(2000.0);
        s.lap();
        clock.set(5000.0);
        s.lap();
        s.pause();
        let csv = s.export_csv().unwrap();

        let (clock, mut fresh) = session_at(0.0);
        assert_eq!(fresh.restore_log(&csv).unwrap(), 2);
        assert_eq!(fresh.elapsed(), 5000.0);
        assert_eq!(fresh.state(), TimerState::Paused);
        assert_eq!(fresh.status(), Status::Idle);
        assert!(!fresh.controls().export_disabled);

        fresh.start();
        clock.set(1500.0);
        let lap = fresh.lap().unwrap();
        assert_eq!((lap.sequence, lap.interval, lap.cumulative), (3, 1500.0, 6500.0));
    }

    #[test]
    fn restore_log_refused_while_running_or_malformed() {
        let (clock, mut s) = session_at(0.0);
        s.start();
        clock.set(700.0);
        s.lap();
        let log = "Lap,Interval,Total\n1,00:01.00,00:01.00\n";
        assert!(matches!(s.restore_log(log), Err(ChronosError::Running)));

        s.pause();
        assert!(s.restore_log("Lap,Interval,Total\n1,00:01.00,10000000000000000:00.00\n").is_err());
        assert_eq!(s.ledger().len(), 1);
        assert_eq!(s.elapsed(), 700.0);
    }

    #[test]
    fn controls_follow_state() {
        let (clock, mut s) = session_at(0.0);
        assert!(s.controls().lap_disabled);
        s.start();
        assert!(s.controls().start_disabled);
        assert!(!s.controls().lap_disabled);
        clock.set(10.0);
        s.tick();
        s.pause();
        assert!(!s.controls().lap_disabled);
        assert!(s.controls().pause_disabled);
    }
}
