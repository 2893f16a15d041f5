use crate::core::types::AxisGeometry;

/// Index-linear mapping between slot positions and axis pixels.
///
/// Every slot gets the same width regardless of the time it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexScale {
    slot_count: usize,
    offset_grid_lines: bool,
}

impl IndexScale {
    /// `positions` is how many indexable values share the axis.
    #[must_use]
    pub fn new(positions: usize, offset_grid_lines: bool) -> Self {
        let edges = if offset_grid_lines {
            positions
        } else {
            positions.saturating_sub(1)
        };
        Self {
            slot_count: edges.max(1),
            offset_grid_lines,
        }
    }

    #[must_use]
    pub fn slot_count(self) -> usize {
        self.slot_count
    }

    #[must_use]
    pub fn slot_width(self, geometry: AxisGeometry) -> f64 {
        geometry.width / self.slot_count as f64
    }

    /// Pixel for `index`. `center` shifts by half a slot.
    #[must_use]
    pub fn index_to_pixel(self, index: usize, center: bool, geometry: AxisGeometry) -> f64 {
        let slot = self.slot_width(geometry);
        let mut offset = slot * index as f64;
        if center {
            offset += slot / 2.0;
        }
        geometry.left + offset.round()
    }

    /// Nearest index for `pixel`; anything left of the first slot is 0.
    #[must_use]
    pub fn pixel_to_index(self, pixel: f64, geometry: AxisGeometry) -> usize {
        let slot = self.slot_width(geometry);
        let mut offset = pixel - geometry.left;
        if self.offset_grid_lines {
            offset -= slot / 2.0;
        }

        if offset <= 0.0 || slot <= 0.0 {
            return 0;
        }
        // NaN casts to 0 and oversized values saturate.
        (offset / slot).round() as usize
    }
}
