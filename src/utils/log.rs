//! Console logging.
//!
//! Messages go to the browser console on WASM builds. Native builds (unit
//! tests) have no console, so logging is a no-op there.

/// Log a warning (`console.warn`).
pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Log an error (`console.error`).
pub fn error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
