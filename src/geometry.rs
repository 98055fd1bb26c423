//! Pixel ↔ domain coordinate mapping.
//!
//! Every function is pure and takes the [`ViewGeometry`] explicitly, so a
//! resize or zoom can never leave a stale axis scale behind: callers map
//! through whatever geometry they were handed, nothing else.
//!
//! The frequency axis mapping is reproduced exactly from the reference
//! editor: it scales by `freq_max` alone and applies `freq_min` as an
//! additive offset rather than interpolating over `freq_max - freq_min`.
//! With `freq_min > 0` this places the bottom canvas edge *below* the
//! nominal minimum frequency. Both directions share the asymmetry, so the
//! mappings stay exact inverses and persisted regions survive zoom/resize
//! unchanged. Do not "fix" one side without migrating stored regions.

use crate::types::{DomainRegion, PixelRect, ViewGeometry};

// ── Axis mappings ────────────────────────────────────────────────────────────

/// Time in seconds at canvas column `x`.
pub fn time_from_x(g: &ViewGeometry, x: f64) -> f64 {
    x / g.canvas_width * g.duration
}

/// Canvas column of time `t` (seconds).
pub fn x_from_time(g: &ViewGeometry, t: f64) -> f64 {
    t / g.duration * g.canvas_width
}

/// Frequency in Hz at canvas row `y` (row 0 is the top of the canvas).
pub fn freq_from_y(g: &ViewGeometry, y: f64) -> f64 {
    g.freq_max - (y / g.canvas_height) * g.freq_max - g.freq_min
}

/// Canvas row of frequency `f` (Hz).
pub fn y_from_freq(g: &ViewGeometry, f: f64) -> f64 {
    (g.freq_max - f - g.freq_min) / g.freq_max * g.canvas_height
}

// ── Span composites ──────────────────────────────────────────────────────────

/// Pixel width spanned by `[start, end]` seconds.
pub fn width_from_time_span(g: &ViewGeometry, start: f64, end: f64) -> f64 {
    x_from_time(g, end) - x_from_time(g, start)
}

/// Pixel height spanned by `[freq_min, freq_max]` Hz. The lower frequency
/// maps to the lower (larger-y) edge, so the height is their difference in
/// that order.
pub fn height_from_freq_span(g: &ViewGeometry, freq_min: f64, freq_max: f64) -> f64 {
    y_from_freq(g, freq_min) - y_from_freq(g, freq_max)
}

// ── Rectangle projections ────────────────────────────────────────────────────

/// Convert a raw gesture rectangle (anchor corner plus signed extent) into
/// domain bounds `(start, end, freq_min, freq_max)`. Signs are preserved:
/// a right-to-left drag yields `end < start`, exactly as the host editor
/// receives them.
pub fn domain_from_pixel(g: &ViewGeometry, x: f64, y: f64, width: f64, height: f64) -> (f64, f64, f64, f64) {
    (
        time_from_x(g, x),
        time_from_x(g, x + width),
        freq_from_y(g, y + height),
        freq_from_y(g, y),
    )
}

/// Project a canonical region into a renderable pixel rectangle under `g`.
pub fn pixel_from_region(g: &ViewGeometry, region: &DomainRegion) -> PixelRect {
    PixelRect {
        x: x_from_time(g, region.start),
        y: y_from_freq(g, region.freq_max),
        width: width_from_time_span(g, region.start, region.end),
        height: height_from_freq_span(g, region.freq_min, region.freq_max),
        color: region.color_key().to_string(),
    }
}
