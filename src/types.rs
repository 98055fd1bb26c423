use serde::{Deserialize, Serialize};

/// Color used for the highlighted region, overriding its label color.
pub const HIGHLIGHT_COLOR: &str = "white";

/// Geometry of the rendered spectrogram view, in canvas pixels plus the
/// domain extents of both axes. This is an ephemeral value recaptured on
/// every ready/resize event and passed explicitly into each mapping call;
/// nothing reads it from ambient state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewGeometry {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Signal duration in seconds.
    pub duration: f64,
    /// Bottom of the frequency axis in Hz.
    pub freq_min: f64,
    /// Top of the frequency axis in Hz.
    pub freq_max: f64,
}

impl ViewGeometry {
    /// Whether every projection through this geometry yields finite pixels.
    /// `freq_max` is a divisor in the frequency mapping, so it must be
    /// positive even though `freq_min` may legitimately be zero.
    pub fn is_ready(&self) -> bool {
        self.canvas_width > 0.0
            && self.canvas_height > 0.0
            && self.duration > 0.0
            && self.freq_max > 0.0
            && self.canvas_width.is_finite()
            && self.canvas_height.is_finite()
            && self.duration.is_finite()
            && self.freq_min.is_finite()
            && self.freq_max.is_finite()
    }
}

/// Stable identifier of a canonical region. Assigned once by the store and
/// never reused within an engine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u64);

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Reference to the classification a region was tagged with: which control
/// produced it, the selected label values, and the stroke color those labels
/// render with when the region is not highlighted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelRef {
    pub control: String,
    pub values: Vec<String>,
    pub stroke_color: String,
}

/// A canonical rectangular annotation in domain units (seconds, Hz).
/// This is the source of truth; pixel rectangles are derived from it and
/// regenerable at any time.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainRegion {
    pub id: RegionId,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Lower frequency bound in Hz.
    pub freq_min: f64,
    /// Upper frequency bound in Hz.
    pub freq_max: f64,
    pub label: Option<LabelRef>,
    pub highlighted: bool,
}

impl DomainRegion {
    /// Render color for this region: highlight overrides the label's stroke
    /// color; a label-less region falls back to the highlight color too.
    pub fn color_key(&self) -> &str {
        if self.highlighted {
            HIGHLIGHT_COLOR
        } else {
            self.label
                .as_ref()
                .map(|l| l.stroke_color.as_str())
                .unwrap_or(HIGHLIGHT_COLOR)
        }
    }

    /// The persisted representation of this region.
    pub fn value(&self) -> RegionValue {
        RegionValue {
            start: self.start,
            end: self.end,
            frequency_min: self.freq_min,
            frequency_max: self.freq_max,
        }
    }
}

/// Persisted form of a region, matching the host annotation format:
/// `{ "start": s, "end": s, "frequencyMin": hz, "frequencyMax": hz }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionValue {
    pub start: f64,
    pub end: f64,
    pub frequency_min: f64,
    pub frequency_max: f64,
}

/// A region projected into canvas pixels for rendering. Derived and
/// disposable: always reproducible from `(DomainRegion, ViewGeometry)`.
/// Width and height keep the sign of the originating gesture; the renderer
/// decides visibility and normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

impl PixelRect {
    /// True when every coordinate is a real number, i.e. the rect came from
    /// a usable geometry and is safe to hand to a renderer.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}
