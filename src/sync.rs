//! Synchronization between canonical regions, view geometry, and the
//! rendered pixel cache.
//!
//! The controller owns the only mutable copy of the view geometry. It is
//! fed piecewise by the host — canvas size and duration arrive with the
//! spectrogram's ready event, the frequency axis arrives separately during
//! plugin init, resizes re-capture the canvas size — and every cache
//! rebuild reads whichever capture is most recent. Until a usable geometry
//! exists, region changes are deferred rather than projected through
//! zeroed axes.

use crate::store::RegionStore;
use crate::types::{DomainRegion, PixelRect, ViewGeometry};

/// Seconds of lead-in before a highlighted region when requesting a scroll.
pub const SCROLL_LEAD_SECS: f64 = 0.5;

/// Host-registered output sinks, one slot per event class.
#[derive(Default)]
pub struct EngineSinks {
    pub(crate) on_region_created: Option<Box<dyn FnMut(&DomainRegion)>>,
    pub(crate) on_pixel_cache_updated: Option<Box<dyn FnMut(&[PixelRect])>>,
    pub(crate) on_scroll_to: Option<Box<dyn FnMut(f64)>>,
}

/// Reacts to geometry and region-set changes by rebuilding and publishing
/// the pixel cache, and steers playback toward the highlighted region.
pub struct SyncController {
    canvas_width: f64,
    canvas_height: f64,
    duration: f64,
    freq_min: f64,
    freq_max: f64,
    /// Set by the first `geometry_ready`; nothing is published before it.
    ready: bool,
    sinks: EngineSinks,
}

impl SyncController {
    pub fn new() -> Self {
        Self {
            canvas_width: 0.0,
            canvas_height: 0.0,
            duration: 0.0,
            freq_min: 0.0,
            freq_max: 0.0,
            ready: false,
            sinks: EngineSinks::default(),
        }
    }

    pub fn sinks_mut(&mut self) -> &mut EngineSinks {
        &mut self.sinks
    }

    /// The current geometry, if a ready event has arrived and every axis is
    /// usable. `None` while the frequency range is still unknown, even
    /// after `geometry_ready`.
    pub fn view_geometry(&self) -> Option<ViewGeometry> {
        if !self.ready {
            return None;
        }
        let g = ViewGeometry {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            duration: self.duration,
            freq_min: self.freq_min,
            freq_max: self.freq_max,
        };
        g.is_ready().then_some(g)
    }

    // ── Event handlers ──────────────────────────────────────────────────────

    /// The spectrogram canvas is sized and the signal duration is known.
    pub fn geometry_ready(&mut self, canvas_width: f64, canvas_height: f64, duration: f64, store: &mut RegionStore) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        self.duration = duration;
        self.ready = true;
        self.publish_cache(store);
    }

    /// Canvas resized or zoomed after the initial ready.
    pub fn geometry_changed(&mut self, canvas_width: f64, canvas_height: f64, store: &mut RegionStore) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        self.publish_cache(store);
    }

    /// The rendered frequency axis is known. Arrives independently of
    /// `geometry_ready` (the renderer reports it during init), so it is
    /// treated as a geometry update in its own right.
    pub fn frequency_range_ready(&mut self, freq_min: f64, freq_max: f64, store: &mut RegionStore) {
        self.freq_min = freq_min;
        self.freq_max = freq_max;
        self.publish_cache(store);
    }

    /// The canonical region collection changed, by any actor. Rebuilds the
    /// cache and, when exactly one region is highlighted, asks the playback
    /// collaborator to scroll to just before it. The target is emitted
    /// unclamped; the collaborator clamps to zero.
    pub fn regions_changed(&mut self, store: &mut RegionStore) {
        if self.view_geometry().is_none() {
            log::debug!("region change before geometry ready; cache rebuild deferred");
            return;
        }
        self.publish_cache(store);

        let target = store
            .sole_highlighted()
            .map(|region| region.start - SCROLL_LEAD_SECS);
        if let Some(target) = target {
            if let Some(sink) = self.sinks.on_scroll_to.as_mut() {
                sink(target);
            }
        }
    }

    // ── Cache publication ───────────────────────────────────────────────────

    fn publish_cache(&mut self, store: &mut RegionStore) {
        let Some(g) = self.view_geometry() else {
            log::debug!("geometry not ready; keeping previous pixel cache");
            return;
        };
        let cache = store.rebuild_pixel_cache(&g);
        if cache.iter().any(|rect| !rect.is_finite()) {
            log::warn!("non-finite pixel rect from geometry {g:?}; cache not published");
            return;
        }
        if let Some(sink) = self.sinks.on_pixel_cache_updated.as_mut() {
            sink(cache);
        }
    }

    pub(crate) fn emit_region_created(&mut self, region: &DomainRegion) {
        if let Some(sink) = self.sinks.on_region_created.as_mut() {
            sink(region);
        }
    }
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new()
    }
}
