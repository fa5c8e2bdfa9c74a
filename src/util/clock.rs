//! Monotonic timestamps for answer timing.

/// Seconds since page load; `0.0` outside the browser.
pub fn now_secs() -> f64 {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or(0.0, |p| p.now() / 1000.0)
    }
    #[cfg(not(feature = "csr"))]
    {
        0.0
    }
}

/// Elapsed seconds since `start`, never negative.
pub fn elapsed_since(start: f64) -> f64 {
    (now_secs() - start).max(0.0)
}
