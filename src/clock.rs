//! Wall-clock access for credential expiry checks.
//!
//! Browsers have no usable `SystemTime` under `wasm32-unknown-unknown`, so
//! the WASM build reads `Date.now()` instead.

/// Current time in whole seconds since the Unix epoch.
#[must_use]
pub fn now_unix_secs() -> i64 {
    #[cfg(target_arch = "wasm32")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0).floor() as i64;
        secs
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
    }
}
