//! specmark — headless geometry and interaction engine for rectangular
//! spectrogram annotations.
//!
//! A host UI renders a spectrogram onto a canvas and forwards pointer,
//! layout, and selection events here; the engine keeps the canonical
//! regions in domain units (seconds, Hz) and hands back pixel rectangles
//! to paint. Because regions are stored in domain space and only projected
//! to pixels on demand, they survive zoom, resize, and re-render.
//!
//! ```
//! use specmark::{LabelsControl, SpecmarkEngine};
//!
//! let mut engine = SpecmarkEngine::new();
//! engine.on_pixel_cache_updated(|rects| {
//!     // hand `rects` to the canvas renderer
//!     let _ = rects;
//! });
//!
//! // The spectrogram renderer reports its geometry...
//! engine.geometry_ready(1000.0, 256.0, 12.5);
//! engine.frequency_range_ready(0.0, 125_000.0);
//!
//! // ...and a drag with a selected label becomes a region.
//! let labels = LabelsControl::new("labels", vec!["Pipistrellus".into()], "#00ff00");
//! engine.pointer_down(100.0, 40.0);
//! let id = engine.pointer_up(220.0, 120.0, &[&labels]).unwrap();
//! assert!(engine.regions().iter().any(|r| r.id == id));
//! ```

pub mod engine;
pub mod geometry;
pub mod gesture;
pub mod label;
pub mod store;
pub mod sync;
pub mod types;

pub use engine::SpecmarkEngine;
pub use gesture::{DrawGesture, GestureRect};
pub use label::{ChoicesControl, ClassificationState, LabelsControl};
pub use store::{RegionEvent, RegionStore};
pub use sync::{SyncController, SCROLL_LEAD_SECS};
pub use types::{
    DomainRegion, LabelRef, PixelRect, RegionId, RegionValue, ViewGeometry, HIGHLIGHT_COLOR,
};
