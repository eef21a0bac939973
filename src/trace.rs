//! Diagnostic tracing, standing in for the reference implementation's global
//! `problema_set_debug` flag.
//!
//! The reference prints hex dumps of intermediate pipeline state directly to
//! stdout when its debug flag is set. This module preserves that
//! observability without hard-wiring stdout: it emits `log::trace!` records,
//! which any `log`-compatible logger can collect, filter, or discard. The
//! atomic flag below additionally gates whether the calls fire at all, so
//! that the common case (tracing left off) skips the formatting work too,
//! not just the final write.

use std::sync::atomic::{AtomicBool, Ordering};

static TRACE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable or disable per-character and per-stage tracing process-wide.
///
/// Mirrors the reference's `problema_set_debug`. Tracing is off by default.
pub fn set_trace_enabled(enabled: bool) {
    TRACE_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether tracing is currently enabled.
pub fn trace_enabled() -> bool {
    TRACE_ENABLED.load(Ordering::Relaxed)
}

pub(crate) fn trace_unicode(label: &str, code: u32) {
    if trace_enabled() {
        log::trace!("{label}: U+{code:04X}");
    }
}

pub(crate) fn trace_state(label: &str, data: &[u8]) {
    if trace_enabled() {
        let hex: Vec<String> = data.iter().map(|b| format!("{b:02x}")).collect();
        log::trace!("{label}: {}", hex.join(" "));
    }
}

pub(crate) fn trace_positions(positions: impl Iterator<Item = u32>) {
    if trace_enabled() {
        let joined: Vec<String> = positions.map(|p| p.to_string()).collect();
        log::trace!("rotor positions: {}", joined.join(" "));
    }
}
