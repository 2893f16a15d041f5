use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{
    AxisGeometry, ChartData, ChronoTimeParser, IndexScale, ParsedData, StepUnitResolver,
    TickSet, TimeInput, TimeParser, TimePoint, TimeUnit, UnitResolver, normalize, select_ticks,
};
use crate::error::{ChartError, ChartResult};

use super::label_format::format_time;
use super::{Axis, EstimatedLabelCapacity, LabelCapacity, TimeSeriesScaleConfig};

/// Time-series axis: every distinct timestamp gets an equal-width slot and
/// ticks are decimated to fit the label capacity.
pub struct TimeSeriesScale {
    config: TimeSeriesScaleConfig,
    parser: Arc<dyn TimeParser>,
    unit_resolver: Arc<dyn UnitResolver>,
    label_capacity: Arc<dyn LabelCapacity>,
    geometry: AxisGeometry,
    parsed: ParsedData,
    ticks: TickSet,
    unit: Option<TimeUnit>,
    major_unit: Option<TimeUnit>,
}

impl TimeSeriesScale {
    /// Validates `config` and wires the default collaborators.
    pub fn new(config: TimeSeriesScaleConfig) -> ChartResult<Self> {
        config.validate()?;
        if config.ticks.auto_skip {
            warn!("ticks.autoSkip is ignored; the time-series axis decimates ticks itself");
        }

        let parser = match config.time.parser.as_deref() {
            Some(pattern) => ChronoTimeParser::with_pattern(pattern),
            None => ChronoTimeParser::new(),
        };
        let capacity_pattern = config
            .time
            .display_formats
            .get(TimeUnit::Millisecond)
            .unwrap_or_default();
        let label_capacity =
            EstimatedLabelCapacity::new(capacity_pattern, config.label_font_size_px);

        Ok(Self {
            config,
            parser: Arc::new(parser),
            unit_resolver: Arc::new(StepUnitResolver),
            label_capacity: Arc::new(label_capacity),
            geometry: AxisGeometry::default(),
            parsed: ParsedData::default(),
            ticks: TickSet::default(),
            unit: None,
            major_unit: None,
        })
    }

    /// Replaces the configured parser (the callback form of `time.parser`).
    #[must_use]
    pub fn with_parser(mut self, parser: impl TimeParser + 'static) -> Self {
        self.parser = Arc::new(parser);
        self
    }

    #[must_use]
    pub fn with_unit_resolver(mut self, resolver: impl UnitResolver + 'static) -> Self {
        self.unit_resolver = Arc::new(resolver);
        self
    }

    #[must_use]
    pub fn with_label_capacity(mut self, capacity: impl LabelCapacity + 'static) -> Self {
        self.label_capacity = Arc::new(capacity);
        self
    }

    #[must_use]
    pub fn config(&self) -> &TimeSeriesScaleConfig {
        &self.config
    }

    #[must_use]
    pub fn geometry(&self) -> AxisGeometry {
        self.geometry
    }

    #[must_use]
    pub fn parsed(&self) -> &ParsedData {
        &self.parsed
    }

    #[must_use]
    pub fn master_timeline(&self) -> &[TimePoint] {
        &self.parsed.master
    }

    #[must_use]
    pub fn ticks(&self) -> &TickSet {
        &self.ticks
    }

    /// Tick unit of the last pass, `None` before ticks are built.
    #[must_use]
    pub fn unit(&self) -> Option<TimeUnit> {
        self.unit
    }

    #[must_use]
    pub fn major_unit(&self) -> Option<TimeUnit> {
        self.major_unit
    }

    #[must_use]
    pub fn display_format(&self) -> Option<&str> {
        self.config.time.display_formats.get(self.unit?)
    }

    #[must_use]
    pub fn major_display_format(&self) -> Option<&str> {
        self.config.time.display_formats.get(self.major_unit?)
    }

    /// Label text per tick. Ticks sitting on a major boundary use the major
    /// format when one exists; a tick with no usable format gets `""`.
    #[must_use]
    pub fn tick_labels(&self) -> Vec<String> {
        let minor = self.display_format();
        let major = self.major_display_format();

        self.ticks
            .timestamps()
            .map(|timestamp| {
                let on_major = self
                    .major_unit
                    .is_some_and(|unit| unit.truncate(timestamp) == Some(timestamp));
                let pattern = if on_major { major.or(minor) } else { minor };
                pattern
                    .and_then(|pattern| format_time(timestamp, pattern))
                    .unwrap_or_default()
            })
            .collect()
    }

    fn index_scale(&self) -> IndexScale {
        IndexScale::new(
            self.parsed.master.len(),
            self.config.grid_lines.offset_grid_lines,
        )
    }
}

impl Axis for TimeSeriesScale {
    fn labels<'a>(&self, data: &'a ChartData) -> &'a [TimeInput] {
        data.axis_labels()
    }

    fn set_geometry(&mut self, geometry: AxisGeometry) -> ChartResult<()> {
        if !geometry.is_valid() {
            return Err(ChartError::InvalidGeometry {
                width: geometry.width,
                height: geometry.height,
            });
        }
        self.geometry = geometry;
        Ok(())
    }

    fn determine_data_limits(&mut self, data: &ChartData) {
        self.parsed = normalize(data, self.parser.as_ref(), self.config.time.round);
        self.ticks = TickSet::default();
        self.unit = None;
        self.major_unit = None;
    }

    fn build_ticks(&mut self) {
        let master = &self.parsed.master;
        let capacity = master.first().map_or(0.0, |&earliest| {
            self.label_capacity
                .label_capacity(earliest, self.geometry.width)
        });

        let selection = select_ticks(
            master,
            self.config.time.min_unit,
            self.config.time.unit,
            capacity,
            self.unit_resolver.as_ref(),
        );

        self.unit = Some(selection.unit);
        self.major_unit = selection.major_unit;
        self.ticks = selection.ticks;

        if self.display_format().is_none() {
            warn!(unit = %selection.unit, "no display format configured for tick unit");
        }
        debug!(
            master = self.parsed.master.len(),
            ticks = self.ticks.len(),
            width = self.geometry.width,
            "time-series layout pass complete"
        );
    }

    fn pixel_for_value(
        &self,
        index: usize,
        dataset_index: Option<usize>,
        include_offset: bool,
    ) -> f64 {
        let index = dataset_index
            .and_then(|dataset| self.parsed.dataset_timestamp(dataset, index))
            .and_then(|timestamp| self.parsed.master.binary_search(&timestamp).ok())
            .unwrap_or(index);

        let center = include_offset
            && (self.config.grid_lines.offset_grid_lines || self.ticks.len() == 1);
        self.index_scale()
            .index_to_pixel(index, center, self.geometry)
    }

    fn pixel_for_tick(&self, position: usize, include_offset: bool) -> Option<f64> {
        let tick = self.ticks.get(position)?;
        let include_offset = include_offset || self.ticks.len() == 1;
        Some(self.pixel_for_value(tick.index, None, include_offset))
    }

    fn value_for_pixel(&self, pixel: f64) -> usize {
        self.index_scale().pixel_to_index(pixel, self.geometry)
    }

    fn base_pixel(&self) -> f64 {
        self.geometry.bottom()
    }
}

impl fmt::Debug for TimeSeriesScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSeriesScale")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("parsed", &self.parsed)
            .field("ticks", &self.ticks)
            .field("unit", &self.unit)
            .field("major_unit", &self.major_unit)
            .finish_non_exhaustive()
    }
}
