//! Environment switches for extra logging in debug builds.

use std::sync::OnceLock;

/// True when `name` is set to 1, true, yes or on (any case).
fn env_switch(name: &str) -> bool {
    std::env::var(name).is_ok_and(|raw| {
        let raw = raw.trim();
        ["1", "true", "yes", "on"].iter().any(|on| raw.eq_ignore_ascii_case(on))
    })
}

/// `CU_DEBUG_MOVES=1` logs every applied move at debug level (debug builds only).
pub fn move_debug_enabled() -> bool {
    if !cfg!(debug_assertions) {
        return false;
    }
    static MOVES: OnceLock<bool> = OnceLock::new();
    *MOVES.get_or_init(|| env_switch("CU_DEBUG_MOVES"))
}
