pub mod scale;
pub mod ticks;
pub mod time_parser;
pub mod time_unit;
pub mod timeline;
pub mod types;
pub mod unit_resolver;

pub use scale::IndexScale;
pub use ticks::{Tick, TickSelection, TickSet, select_ticks};
pub use time_parser::{ChronoTimeParser, TimeParser};
pub use time_unit::TimeUnit;
pub use timeline::{ParsedData, normalize};
pub use types::{AxisGeometry, ChartData, Dataset, Datum, PointDatum, TimeInput, TimePoint};
pub use unit_resolver::{StepUnitResolver, UnitResolver};
