use tracing::{debug, trace};

use crate::core::{ChartData, TimeInput, TimeParser, TimePoint, TimeUnit};

/// Timestamps derived from one data-limits pass.
///
/// `labels` and `datasets` stay positionally aligned with their sources;
/// `None` marks a value that failed to parse and was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedData {
    pub labels: Vec<Option<TimePoint>>,
    pub datasets: Vec<Vec<Option<TimePoint>>>,
    pub master: Vec<TimePoint>,
}

impl ParsedData {
    /// Timestamp of `dataset[index]`, if that dataset has a valid value there.
    #[must_use]
    pub fn dataset_timestamp(&self, dataset: usize, index: usize) -> Option<TimePoint> {
        self.datasets.get(dataset)?.get(index).copied().flatten()
    }
}

/// Parses labels and visible point datasets into timelines and builds the
/// sorted, deduplicated master timeline.
pub fn normalize(
    data: &ChartData,
    parser: &dyn TimeParser,
    round: Option<TimeUnit>,
) -> ParsedData {
    let labels: Vec<Option<TimePoint>> = data
        .axis_labels()
        .iter()
        .map(|label| parse_time(parser, label, round))
        .collect();

    let datasets: Vec<Vec<Option<TimePoint>>> = data
        .datasets
        .iter()
        .map(|dataset| {
            if dataset.has_point_data() && !dataset.hidden {
                dataset
                    .data
                    .iter()
                    .map(|datum| {
                        datum
                            .time_input()
                            .and_then(|input| parse_time(parser, &input, round))
                    })
                    .collect()
            } else {
                labels.clone()
            }
        })
        .collect();

    let mut master: Vec<TimePoint> = labels
        .iter()
        .chain(datasets.iter().flatten())
        .flatten()
        .copied()
        .collect();
    master.sort_unstable();
    master.dedup();

    debug!(
        labels = labels.len(),
        datasets = datasets.len(),
        master = master.len(),
        "determined time-series data limits"
    );

    ParsedData {
        labels,
        datasets,
        master,
    }
}

fn parse_time(
    parser: &dyn TimeParser,
    input: &TimeInput,
    round: Option<TimeUnit>,
) -> Option<TimePoint> {
    let Some(time) = parser.parse(input) else {
        trace!(?input, "dropping unparseable time value");
        return None;
    };

    match round {
        Some(unit) => {
            let rounded = unit.truncate(time);
            if rounded.is_none() {
                trace!(time, %unit, "dropping time value outside calendar range");
            }
            rounded
        }
        None => Some(time),
    }
}
