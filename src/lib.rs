//! Stopwatch core for the Chronos widget: elapsed-time engine, lap ledger,
//! time formatting and the clock-face geometry the UI draws from.
//!
//! Nothing here touches the DOM. The Yew front end in `main.rs` owns a
//! [`Session`] and drives it once per animation frame.

/// Milliseconds with sub-millisecond fraction, as read from the host clock.
pub type Millis = f64;

pub mod clock;
pub mod controls;
pub mod dial;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod parallax;
pub mod session;
pub mod timefmt;

pub use clock::{Clock, ManualClock, PerformanceClock};
pub use controls::ControlState;
pub use dial::DialPose;
pub use engine::{Snapshot, TimerEngine, TimerState};
pub use error::ChronosError;
pub use ledger::{read_lap_log, LapLedger, LapRecord};
pub use parallax::ParallaxPose;
pub use session::{Session, Status};
pub use timefmt::{format_clock, format_time, parse_clock, TimeParts};
