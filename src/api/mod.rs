mod axis;
mod config;
mod label_capacity;
mod label_format;
mod timeseries_scale;

pub use axis::Axis;
pub use config::{
    DisplayFormats, GridLineOptions, TickOptions, TimeOptions, TimeSeriesScaleConfig,
};
pub use label_capacity::{EstimatedLabelCapacity, FixedLabelCapacity, LabelCapacity};
pub use label_format::{QUARTER_TOKEN, format_time, is_valid_pattern};
pub use timeseries_scale::TimeSeriesScale;
