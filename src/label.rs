//! Classification state eligibility.
//!
//! The host UI owns a heterogeneous set of annotation controls (label
//! pickers, choice lists, ratings, …). Only some of them can tag a freshly
//! drawn region. Rather than inspecting the host's state objects, the
//! engine sees them through one small trait: each control reports whether
//! it is currently eligible and, if so, what label reference it yields.

use crate::types::LabelRef;

/// One annotation control as the engine sees it at gesture completion.
pub trait ClassificationState {
    /// Whether this control can tag a new region right now.
    fn is_eligible(&self) -> bool;

    /// The label reference a new region would carry. Only meaningful when
    /// [`is_eligible`](Self::is_eligible) returns true.
    fn label_ref(&self) -> LabelRef;
}

/// A label-picker control. Eligible whenever at least one label value is
/// selected; the selection becomes the new region's tag.
#[derive(Clone, Debug)]
pub struct LabelsControl {
    pub name: String,
    pub selected: Vec<String>,
    pub stroke_color: String,
}

impl LabelsControl {
    pub fn new(name: impl Into<String>, selected: Vec<String>, stroke_color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected,
            stroke_color: stroke_color.into(),
        }
    }
}

impl ClassificationState for LabelsControl {
    fn is_eligible(&self) -> bool {
        !self.selected.is_empty()
    }

    fn label_ref(&self) -> LabelRef {
        LabelRef {
            control: self.name.clone(),
            values: self.selected.clone(),
            stroke_color: self.stroke_color.clone(),
        }
    }
}

/// A whole-task choice control (e.g. a rating or per-recording choice).
/// Present in the host's active-state list but never produces regions.
#[derive(Clone, Debug)]
pub struct ChoicesControl {
    pub name: String,
    pub selected: Vec<String>,
}

impl ChoicesControl {
    pub fn new(name: impl Into<String>, selected: Vec<String>) -> Self {
        Self { name: name.into(), selected }
    }
}

impl ClassificationState for ChoicesControl {
    fn is_eligible(&self) -> bool {
        false
    }

    fn label_ref(&self) -> LabelRef {
        LabelRef {
            control: self.name.clone(),
            values: self.selected.clone(),
            stroke_color: String::new(),
        }
    }
}
