use crate::core::{AxisGeometry, ChartData, TimeInput};
use crate::error::ChartResult;

/// Capabilities a host layout engine drives on an axis, once per pass:
/// geometry, data limits, ticks, then any number of pixel queries.
pub trait Axis {
    /// Raw labels this axis reads from the chart.
    fn labels<'a>(&self, data: &'a ChartData) -> &'a [TimeInput];

    fn set_geometry(&mut self, geometry: AxisGeometry) -> ChartResult<()>;

    fn determine_data_limits(&mut self, data: &ChartData);

    fn build_ticks(&mut self);

    /// Pixel for the value at `index`, optionally resolved through a dataset.
    fn pixel_for_value(
        &self,
        index: usize,
        dataset_index: Option<usize>,
        include_offset: bool,
    ) -> f64;

    /// Pixel for the displayed tick at `position`, `None` past the last tick.
    fn pixel_for_tick(&self, position: usize, include_offset: bool) -> Option<f64>;

    fn value_for_pixel(&self, pixel: f64) -> usize;

    fn base_pixel(&self) -> f64;

    /// Runs one full layout pass in the required order.
    fn layout(&mut self, data: &ChartData, geometry: AxisGeometry) -> ChartResult<()> {
        self.set_geometry(geometry)?;
        self.determine_data_limits(data);
        self.build_ticks();
        Ok(())
    }
}
