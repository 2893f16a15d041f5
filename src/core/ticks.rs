use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{TimePoint, TimeUnit, UnitResolver};

/// A displayed tick and the master-timeline position it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    pub timestamp: TimePoint,
    pub index: usize,
}

impl Tick {
    #[must_use]
    pub fn new(timestamp: TimePoint, index: usize) -> Self {
        Self { timestamp, index }
    }
}

/// Ordered ticks with strictly increasing timestamps and indices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickSet {
    ticks: Vec<Tick>,
}

impl TickSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<Tick> {
        self.ticks.get(position).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Tick] {
        &self.ticks
    }

    pub fn timestamps(&self) -> impl Iterator<Item = TimePoint> + '_ {
        self.ticks.iter().map(|tick| tick.timestamp)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.ticks.iter().map(|tick| tick.index)
    }
}

/// Outcome of one tick-building pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSelection {
    pub unit: TimeUnit,
    pub major_unit: Option<TimeUnit>,
    pub ticks: TickSet,
}

/// Picks the units for `master` and decimates it into displayed ticks.
///
/// `capacity` is how many labels fit on the axis. Ticks keep at least
/// `master.len() / capacity` master positions apart, except where a major
/// boundary or the final point forces one in.
pub fn select_ticks(
    master: &[TimePoint],
    min_unit: TimeUnit,
    explicit_unit: Option<TimeUnit>,
    capacity: f64,
    resolver: &dyn UnitResolver,
) -> TickSelection {
    let (Some(&min), Some(&max)) = (master.first(), master.last()) else {
        let unit = explicit_unit.unwrap_or(min_unit);
        return TickSelection {
            unit,
            major_unit: resolver.major_unit(unit),
            ticks: TickSet::default(),
        };
    };

    let unit =
        explicit_unit.unwrap_or_else(|| resolver.determine_unit(min_unit, min, max, capacity));
    let major_unit = resolver.major_unit(unit);
    let skip_count = master.len() as f64 / capacity;
    let ticks = decimate(master, major_unit, skip_count);

    debug!(
        %unit,
        major_unit = ?major_unit,
        capacity,
        skip_count,
        ticks = ticks.len(),
        "built time-series ticks"
    );

    TickSelection {
        unit,
        major_unit,
        ticks: TickSet { ticks },
    }
}

fn decimate(master: &[TimePoint], major_unit: Option<TimeUnit>, skip_count: f64) -> Vec<Tick> {
    let major_start = |time: TimePoint| match major_unit {
        Some(unit) => unit.truncate(time).unwrap_or(time),
        None => time,
    };

    let mut ticks: Vec<Tick> = Vec::new();
    for (index, &time) in master.iter().enumerate() {
        let Some(last) = ticks.last().copied() else {
            ticks.push(Tick::new(major_start(time), index));
            continue;
        };
        let previous = master[index - 1];
        let gap = (index - last.index) as f64;
        let is_last_point = index + 1 == master.len();
        let crosses_major =
            major_unit.is_some() && major_start(time) != major_start(previous);

        if crosses_major {
            let boundary = Tick::new(major_start(time), index);
            if gap < skip_count && ticks.len() > 1 {
                let count = ticks.len();
                ticks[count - 1] = boundary;
                if count > 2 {
                    // Re-center the tick before the collapsed one.
                    let anchor = ticks[count - 3].index;
                    let middle = anchor + (index - anchor).div_ceil(2);
                    ticks[count - 2] = Tick::new(master[middle], middle);
                }
            } else {
                ticks.push(boundary);
            }
        } else if gap > skip_count {
            ticks.push(Tick::new(time, index));
        } else if is_last_point {
            if gap < skip_count {
                let count = ticks.len();
                ticks[count - 1] = Tick::new(time, index);
            } else {
                ticks.push(Tick::new(time, index));
            }
        }
    }

    ticks
}
