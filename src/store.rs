//! Canonical region collection and its derived pixel cache.
//!
//! The store owns the ordered, authoritative list of domain-space regions
//! and a regenerable projection of them into canvas pixels. The pixel cache
//! is never authoritative: it is rebuilt wholesale from
//! `(regions, ViewGeometry)` and carries no state of its own.
//!
//! Mutations flow through named methods — region creation from a completed
//! gesture, and the editing-surface mutators the host's resize handles and
//! label editor call. Every mutation notifies subscribers with a
//! [`RegionEvent`] after the canonical state has settled; handlers receive
//! only the event, never the store, so they cannot re-enter it.

use crate::geometry;
use crate::gesture::GestureRect;
use crate::types::{DomainRegion, LabelRef, PixelRect, RegionId, ViewGeometry};

/// What changed in the canonical collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegionEvent {
    Created(RegionId),
    Updated(RegionId),
    Removed(RegionId),
    HighlightChanged,
}

type Handler = Box<dyn FnMut(&RegionEvent)>;

/// Ordered canonical regions plus the derived pixel cache.
pub struct RegionStore {
    regions: Vec<DomainRegion>,
    pixel_cache: Vec<PixelRect>,
    next_id: u64,
    subscribers: Vec<Handler>,
}

impl RegionStore {
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            pixel_cache: Vec::new(),
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register a handler fired after every canonical mutation.
    pub fn subscribe(&mut self, handler: Handler) {
        self.subscribers.push(handler);
    }

    fn notify(&mut self, event: RegionEvent) {
        for handler in &mut self.subscribers {
            handler(&event);
        }
    }

    // ── Canonical collection ────────────────────────────────────────────────

    /// Create a canonical region from a completed gesture rectangle,
    /// converting to domain units under `g`. A gesture without a label is a
    /// deliberate no-op (the user dragged with nothing selected), not an
    /// error: log and return `None`.
    pub fn create_region(
        &mut self,
        g: &ViewGeometry,
        rect: GestureRect,
        label: Option<LabelRef>,
    ) -> Option<DomainRegion> {
        let Some(label) = label else {
            log::warn!("discarding gesture: no active classification control");
            return None;
        };

        let (start, end, freq_min, freq_max) =
            geometry::domain_from_pixel(g, rect.x, rect.y, rect.width, rect.height);

        let region = DomainRegion {
            id: RegionId(self.next_id),
            start,
            end,
            freq_min,
            freq_max,
            label: Some(label),
            highlighted: false,
        };
        self.next_id += 1;

        log::debug!(
            "region {} created: {:.3}s..{:.3}s, {:.1}..{:.1} Hz",
            region.id, region.start, region.end, region.freq_min, region.freq_max
        );

        self.regions.push(region.clone());
        self.notify(RegionEvent::Created(region.id));
        Some(region)
    }

    /// Read-only view of the canonical regions, in insertion order.
    pub fn regions(&self) -> &[DomainRegion] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&DomainRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    // ── Editing surface ─────────────────────────────────────────────────────
    //
    // Called by the host's annotation editing UI (resize handles, label
    // picker, region list). Each returns false for an unknown id.

    /// Replace a region's domain bounds.
    pub fn update_bounds(
        &mut self,
        id: RegionId,
        start: f64,
        end: f64,
        freq_min: f64,
        freq_max: f64,
    ) -> bool {
        let Some(region) = self.regions.iter_mut().find(|r| r.id == id) else {
            log::warn!("update_bounds: unknown region {id}");
            return false;
        };
        region.start = start;
        region.end = end;
        region.freq_min = freq_min;
        region.freq_max = freq_max;
        self.notify(RegionEvent::Updated(id));
        true
    }

    /// Replace a region's label reference.
    pub fn set_label(&mut self, id: RegionId, label: Option<LabelRef>) -> bool {
        let Some(region) = self.regions.iter_mut().find(|r| r.id == id) else {
            log::warn!("set_label: unknown region {id}");
            return false;
        };
        region.label = label;
        self.notify(RegionEvent::Updated(id));
        true
    }

    /// Highlight or un-highlight a region. At most one region is ever
    /// highlighted: turning one on turns all others off.
    pub fn set_highlighted(&mut self, id: RegionId, highlighted: bool) -> bool {
        if self.regions.iter().all(|r| r.id != id) {
            log::warn!("set_highlighted: unknown region {id}");
            return false;
        }
        for region in &mut self.regions {
            region.highlighted = if region.id == id { highlighted } else { false };
        }
        self.notify(RegionEvent::HighlightChanged);
        true
    }

    /// Remove a region from the canonical collection.
    pub fn remove_region(&mut self, id: RegionId) -> bool {
        let before = self.regions.len();
        self.regions.retain(|r| r.id != id);
        if self.regions.len() == before {
            log::warn!("remove_region: unknown region {id}");
            return false;
        }
        self.notify(RegionEvent::Removed(id));
        true
    }

    /// The single highlighted region, if exactly one exists.
    pub fn sole_highlighted(&self) -> Option<&DomainRegion> {
        let mut highlighted = self.regions.iter().filter(|r| r.highlighted);
        match (highlighted.next(), highlighted.next()) {
            (Some(region), None) => Some(region),
            _ => None,
        }
    }

    // ── Pixel cache ─────────────────────────────────────────────────────────

    /// Reproject every canonical region into pixel space under `g`,
    /// replacing the cache. One rect per region, order preserved, no
    /// visibility filtering — the renderer decides what to paint. Does not
    /// touch canonical state and does not notify.
    pub fn rebuild_pixel_cache(&mut self, g: &ViewGeometry) -> &[PixelRect] {
        self.pixel_cache = self
            .regions
            .iter()
            .map(|region| geometry::pixel_from_region(g, region))
            .collect();
        &self.pixel_cache
    }

    /// The most recently built cache, without recomputation.
    pub fn pixel_cache(&self) -> &[PixelRect] {
        &self.pixel_cache
    }
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn geom() -> ViewGeometry {
        ViewGeometry {
            canvas_width: 100.0,
            canvas_height: 100.0,
            duration: 10.0,
            freq_min: 0.0,
            freq_max: 1000.0,
        }
    }

    fn label(color: &str) -> LabelRef {
        LabelRef {
            control: "labels".into(),
            values: vec!["Call".into()],
            stroke_color: color.into(),
        }
    }

    fn rect(x: f64, y: f64, w: f64, h: f64) -> GestureRect {
        GestureRect { x, y, width: w, height: h }
    }

    #[test]
    fn test_create_region_converts_to_domain_units() {
        let mut store = RegionStore::new();
        let region = store
            .create_region(&geom(), rect(10.0, 20.0, 20.0, 40.0), Some(label("#f00")))
            .unwrap();
        assert!((region.start - 1.0).abs() < 1e-9);
        assert!((region.end - 3.0).abs() < 1e-9);
        assert!((region.freq_min - 400.0).abs() < 1e-9);
        assert!((region.freq_max - 800.0).abs() < 1e-9);
        assert_eq!(store.len(), 1);
        assert_eq!(store.regions()[0], region);
    }

    #[test]
    fn test_create_without_label_is_silent_noop() {
        let mut store = RegionStore::new();
        let events: Rc<RefCell<Vec<RegionEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(Box::new(move |ev| sink.borrow_mut().push(*ev)));

        assert!(store.create_region(&geom(), rect(0.0, 0.0, 5.0, 5.0), None).is_none());
        assert!(store.is_empty());
        assert!(events.borrow().is_empty(), "no-label create must not notify");
    }

    #[test]
    fn test_ids_are_fresh_and_stable() {
        let mut store = RegionStore::new();
        let g = geom();
        let a = store.create_region(&g, rect(0.0, 0.0, 10.0, 10.0), Some(label("#f00"))).unwrap();
        let b = store.create_region(&g, rect(20.0, 0.0, 10.0, 10.0), Some(label("#f00"))).unwrap();
        assert_ne!(a.id, b.id);
        store.remove_region(a.id);
        let c = store.create_region(&g, rect(40.0, 0.0, 10.0, 10.0), Some(label("#f00"))).unwrap();
        assert_ne!(c.id, b.id, "removed ids are never reused");
    }

    #[test]
    fn test_cache_cardinality_matches_regions() {
        let mut store = RegionStore::new();
        let g = geom();
        for i in 0..5 {
            store.create_region(&g, rect(i as f64 * 10.0, 0.0, 5.0, 5.0), Some(label("#0f0")));
        }
        assert_eq!(store.rebuild_pixel_cache(&g).len(), store.regions().len());
        // Zero-size and off-screen regions are kept, not filtered.
        store.create_region(&g, rect(500.0, 0.0, 0.0, 0.0), Some(label("#0f0")));
        assert_eq!(store.rebuild_pixel_cache(&g).len(), 6);
    }

    #[test]
    fn test_rebuild_is_idempotent_and_pure() {
        let mut store = RegionStore::new();
        let g = geom();
        store.create_region(&g, rect(10.0, 20.0, 20.0, 40.0), Some(label("#00f")));
        let first: Vec<_> = store.rebuild_pixel_cache(&g).to_vec();
        let regions_before: Vec<_> = store.regions().to_vec();
        let second: Vec<_> = store.rebuild_pixel_cache(&g).to_vec();
        assert_eq!(first, second);
        assert_eq!(store.regions(), &regions_before[..]);
        assert_eq!(store.pixel_cache(), &first[..]);
    }

    #[test]
    fn test_highlight_overrides_color_and_stays_exclusive() {
        let mut store = RegionStore::new();
        let g = geom();
        let a = store.create_region(&g, rect(0.0, 0.0, 10.0, 10.0), Some(label("#123"))).unwrap();
        let b = store.create_region(&g, rect(20.0, 0.0, 10.0, 10.0), Some(label("#456"))).unwrap();

        store.set_highlighted(a.id, true);
        store.set_highlighted(b.id, true);
        let highlighted: Vec<_> = store.regions().iter().filter(|r| r.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].id, b.id);
        assert_eq!(store.sole_highlighted().unwrap().id, b.id);

        let cache = store.rebuild_pixel_cache(&g);
        assert_eq!(cache[0].color, "#123");
        assert_eq!(cache[1].color, crate::types::HIGHLIGHT_COLOR);
    }

    #[test]
    fn test_mutators_reject_unknown_ids() {
        let mut store = RegionStore::new();
        let ghost = RegionId(99);
        assert!(!store.update_bounds(ghost, 0.0, 1.0, 0.0, 1.0));
        assert!(!store.set_label(ghost, None));
        assert!(!store.set_highlighted(ghost, true));
        assert!(!store.remove_region(ghost));
    }

    #[test]
    fn test_every_mutation_notifies() {
        let mut store = RegionStore::new();
        let events: Rc<RefCell<Vec<RegionEvent>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(Box::new(move |ev| sink.borrow_mut().push(*ev)));

        let g = geom();
        let region = store.create_region(&g, rect(0.0, 0.0, 10.0, 10.0), Some(label("#f00"))).unwrap();
        store.update_bounds(region.id, 0.0, 2.0, 100.0, 200.0);
        store.set_label(region.id, None);
        store.set_highlighted(region.id, true);
        store.remove_region(region.id);

        let seen = events.borrow();
        assert_eq!(
            &seen[..],
            &[
                RegionEvent::Created(region.id),
                RegionEvent::Updated(region.id),
                RegionEvent::Updated(region.id),
                RegionEvent::HighlightChanged,
                RegionEvent::Removed(region.id),
            ]
        );
    }
}
