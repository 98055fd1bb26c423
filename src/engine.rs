//! The engine façade: the single surface the host UI talks to.
//!
//! Wires the drawing state machine, the region store, and the sync
//! controller together, and enforces the serial event model: every input
//! runs to completion, and any canonical change it caused is synchronized
//! before the call returns. The store's subscribe/notify seam only marks a
//! dirty flag; the flush happens here, after the store has settled, so the
//! rebuild always sees the latest geometry and never re-enters the store.

use std::cell::Cell;
use std::rc::Rc;

use crate::gesture::DrawGesture;
use crate::label::ClassificationState;
use crate::store::RegionStore;
use crate::sync::SyncController;
use crate::types::{DomainRegion, PixelRect, RegionId, RegionValue, ViewGeometry};

pub struct SpecmarkEngine {
    store: RegionStore,
    gesture: DrawGesture,
    sync: SyncController,
    regions_dirty: Rc<Cell<bool>>,
}

impl SpecmarkEngine {
    pub fn new() -> Self {
        let mut store = RegionStore::new();
        let regions_dirty = Rc::new(Cell::new(false));
        let flag = regions_dirty.clone();
        store.subscribe(Box::new(move |_event| flag.set(true)));
        Self {
            store,
            gesture: DrawGesture::new(),
            sync: SyncController::new(),
            regions_dirty,
        }
    }

    /// Synchronize after any input that may have mutated canonical state.
    fn flush(&mut self) {
        if self.regions_dirty.replace(false) {
            self.sync.regions_changed(&mut self.store);
        }
    }

    // ── Output registration ─────────────────────────────────────────────────

    pub fn on_region_created(&mut self, sink: impl FnMut(&DomainRegion) + 'static) {
        self.sync.sinks_mut().on_region_created = Some(Box::new(sink));
    }

    pub fn on_pixel_cache_updated(&mut self, sink: impl FnMut(&[PixelRect]) + 'static) {
        self.sync.sinks_mut().on_pixel_cache_updated = Some(Box::new(sink));
    }

    pub fn on_scroll_to(&mut self, sink: impl FnMut(f64) + 'static) {
        self.sync.sinks_mut().on_scroll_to = Some(Box::new(sink));
    }

    // ── Pointer input ───────────────────────────────────────────────────────

    /// Begin a drag at `(x, y)` (canvas pixels, origin top-left). Always
    /// allowed; eligibility is decided at completion.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.gesture.pointer_down(x, y);
    }

    /// Complete a drag at `(x, y)`. `states` is the host's current list of
    /// active annotation controls; the last eligible one tags the new
    /// region. With no eligible control the gesture is discarded silently.
    pub fn pointer_up(
        &mut self,
        x: f64,
        y: f64,
        states: &[&dyn ClassificationState],
    ) -> Option<RegionId> {
        let rect = self.gesture.pointer_up(x, y)?;

        let label = states
            .iter()
            .filter(|s| s.is_eligible())
            .last()
            .map(|s| s.label_ref());
        if label.is_none() {
            log::debug!("gesture completed with no eligible control; discarded");
            return None;
        }

        let Some(g) = self.sync.view_geometry() else {
            // A canonical region must never carry pixel-divided-by-zero
            // bounds, so a drag finished before the view is ready is
            // discarded like a label-less one.
            log::warn!("gesture completed before geometry ready; discarded");
            return None;
        };

        let region = self.store.create_region(&g, rect, label)?;
        self.sync.emit_region_created(&region);
        self.flush();
        Some(region.id)
    }

    // ── Geometry input ──────────────────────────────────────────────────────

    pub fn geometry_ready(&mut self, canvas_width: f64, canvas_height: f64, duration: f64) {
        self.sync.geometry_ready(canvas_width, canvas_height, duration, &mut self.store);
    }

    pub fn geometry_changed(&mut self, canvas_width: f64, canvas_height: f64) {
        self.sync.geometry_changed(canvas_width, canvas_height, &mut self.store);
    }

    pub fn frequency_range_ready(&mut self, freq_min: f64, freq_max: f64) {
        self.sync.frequency_range_ready(freq_min, freq_max, &mut self.store);
    }

    /// Notification that the canonical collection was mutated by an actor
    /// outside this engine's editing surface.
    pub fn regions_changed(&mut self) {
        self.regions_dirty.set(false);
        self.sync.regions_changed(&mut self.store);
    }

    // ── Editing surface ─────────────────────────────────────────────────────
    //
    // Forwarded to the store, then synchronized. The host's resize handles,
    // label picker and region list call these.

    pub fn update_region_bounds(&mut self, id: RegionId, start: f64, end: f64, freq_min: f64, freq_max: f64) -> bool {
        let changed = self.store.update_bounds(id, start, end, freq_min, freq_max);
        self.flush();
        changed
    }

    pub fn set_region_label(&mut self, id: RegionId, label: Option<crate::types::LabelRef>) -> bool {
        let changed = self.store.set_label(id, label);
        self.flush();
        changed
    }

    pub fn highlight_region(&mut self, id: RegionId, highlighted: bool) -> bool {
        let changed = self.store.set_highlighted(id, highlighted);
        self.flush();
        changed
    }

    pub fn remove_region(&mut self, id: RegionId) -> bool {
        let removed = self.store.remove_region(id);
        self.flush();
        removed
    }

    // ── Read access ─────────────────────────────────────────────────────────

    pub fn regions(&self) -> &[DomainRegion] {
        self.store.regions()
    }

    pub fn pixel_cache(&self) -> &[PixelRect] {
        self.store.pixel_cache()
    }

    pub fn view_geometry(&self) -> Option<ViewGeometry> {
        self.sync.view_geometry()
    }

    pub fn region_value(&self, id: RegionId) -> Option<RegionValue> {
        self.store.region(id).map(|r| r.value())
    }

    /// All regions in their persisted form, as a JSON array.
    pub fn export_regions(&self) -> serde_json::Result<String> {
        let values: Vec<RegionValue> = self.store.regions().iter().map(|r| r.value()).collect();
        serde_json::to_string(&values)
    }
}

impl Default for SpecmarkEngine {
    fn default() -> Self {
        Self::new()
    }
}
