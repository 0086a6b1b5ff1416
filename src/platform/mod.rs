//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - RNG seeding
//! - Logger installation

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new run's obstacle RNG
pub fn run_seed() -> u64 {
    now_ms() as u64
}

/// Route `log` output to the browser console
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::LevelFilter) {
    console_error_panic_hook::set_once();
    let level = level.to_level().unwrap_or(log::Level::Error);
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("Logger already set: {}", e).into());
    }
}

/// Route `log` output to stderr (`RUST_LOG` overrides `level`)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(now_ms() > 1_577_836_800_000.0);
    }
}
