//! Application-level configuration constants.

use log::LevelFilter;

// Status banner
pub const STATUS_READY: &str = "READY FOR LAUNCH";
pub const STATUS_ENGAGED: &str = "WARP DRIVE ENGAGED";
pub const STATUS_IDLE: &str = "SYSTEM IDLE";

// Body class toggled while the clock runs
pub const WARP_CLASS: &str = "warp-active";

// Export
pub const EXPORT_FILE_PREFIX: &str = "chronos_flight_log_";
pub const CSV_DATA_URI_PREFIX: &str = "data:text/csv;charset=utf-8,";

// Backdrop
pub const BG_LAYER_COUNT: usize = 3;

pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;
