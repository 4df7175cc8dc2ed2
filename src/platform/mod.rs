//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Seed entropy for new boards
//! - The JavaScript binding used by the web front-end (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed for a fresh board, taken from the clock
#[cfg(target_arch = "wasm32")]
pub fn entropy_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a fresh board, taken from the clock
#[cfg(not(target_arch = "wasm32"))]
pub fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_seed_varies() {
        let a = entropy_seed();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_ne!(a, entropy_seed());
    }
}
