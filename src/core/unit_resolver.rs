use crate::core::{TimePoint, TimeUnit};

/// Chooses the tick unit for a data span and the major unit above it.
pub trait UnitResolver: Send + Sync {
    /// Finest unit, not finer than `min_unit`, whose ticks fit `capacity`.
    fn determine_unit(
        &self,
        min_unit: TimeUnit,
        min: TimePoint,
        max: TimePoint,
        capacity: f64,
    ) -> TimeUnit;

    /// Coarser unit used to align ticks on boundaries, if any.
    fn major_unit(&self, unit: TimeUnit) -> Option<TimeUnit>;
}

/// Resolver driven by the largest "nice" step each unit allows.
///
/// A unit is accepted when the span, measured in its largest step, needs no
/// more than `capacity` ticks. Years always fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepUnitResolver;

impl StepUnitResolver {
    fn largest_step(unit: TimeUnit) -> Option<f64> {
        match unit {
            TimeUnit::Millisecond => Some(500.0),
            TimeUnit::Second | TimeUnit::Minute => Some(30.0),
            TimeUnit::Hour => Some(12.0),
            TimeUnit::Day => Some(5.0),
            TimeUnit::Week | TimeUnit::Quarter => Some(4.0),
            TimeUnit::Month => Some(3.0),
            TimeUnit::Year => None,
        }
    }
}

impl UnitResolver for StepUnitResolver {
    fn determine_unit(
        &self,
        min_unit: TimeUnit,
        min: TimePoint,
        max: TimePoint,
        capacity: f64,
    ) -> TimeUnit {
        let span = max.saturating_sub(min) as f64;
        TimeUnit::ALL
            .into_iter()
            .filter(|unit| *unit >= min_unit)
            .find(|unit| match Self::largest_step(*unit) {
                Some(step) => (span / (step * unit.nominal_millis())).ceil() <= capacity,
                None => true,
            })
            .unwrap_or(TimeUnit::Year)
    }

    fn major_unit(&self, unit: TimeUnit) -> Option<TimeUnit> {
        unit.coarser()
    }
}
