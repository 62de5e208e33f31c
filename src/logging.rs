//! Logger installation for the `log` facade.
//!
//! Records go to the browser console on wasm32 (`console_log`) and through
//! `env_logger` elsewhere.

use log::LevelFilter;
use std::sync::Once;

static INIT: Once = Once::new();

#[cfg(target_arch = "wasm32")]
fn install(level: LevelFilter) {
    let Some(max) = level.to_level() else {
        log::set_max_level(LevelFilter::Off);
        return;
    };
    if console_log::init_with_level(max).is_err() {
        // Someone else already owns the global logger.
        return;
    }
    log::set_max_level(level);
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .is_test(cfg!(test))
        .try_init();
}

/// Install the console logger once; later calls are ignored.
pub fn init_logging(level: LevelFilter) {
    INIT.call_once(|| {
        install(level);
        log::debug!("logging initialized at {}", level);
    });
}
