use crate::core::TimePoint;

use super::label_format::{estimate_label_text_width_px, format_time};

/// How many tick labels fit along the axis without overlapping.
pub trait LabelCapacity: Send + Sync {
    /// `sample` is a representative time; `axis_length_px` the usable length.
    fn label_capacity(&self, sample: TimePoint, axis_length_px: f64) -> f64;
}

/// Capacity from the estimated width of `sample` rendered with the widest
/// display pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatedLabelCapacity {
    pattern: String,
    font_size_px: f64,
}

impl EstimatedLabelCapacity {
    #[must_use]
    pub fn new(pattern: impl Into<String>, font_size_px: f64) -> Self {
        Self {
            pattern: pattern.into(),
            font_size_px,
        }
    }
}

impl LabelCapacity for EstimatedLabelCapacity {
    fn label_capacity(&self, sample: TimePoint, axis_length_px: f64) -> f64 {
        let label = format_time(sample, &self.pattern).unwrap_or_default();
        let label_width = estimate_label_text_width_px(&label, self.font_size_px);
        if !label_width.is_finite() || label_width <= 0.0 {
            return 0.0;
        }
        (axis_length_px / label_width).max(0.0)
    }
}

/// Fixed capacity, independent of geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLabelCapacity(pub f64);

impl LabelCapacity for FixedLabelCapacity {
    fn label_capacity(&self, _sample: TimePoint, _axis_length_px: f64) -> f64 {
        self.0
    }
}
