use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Milliseconds since the Unix epoch, UTC.
pub type TimePoint = i64;

/// Raw time value as it arrives from chart labels or point data.
///
/// Any JSON scalar deserializes: fractional numbers are truncated to whole
/// milliseconds, and `null`, booleans, containers or numbers outside the `i64`
/// range become `Invalid` so they leave a gap instead of failing the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "RawTimeInput")]
pub enum TimeInput {
    Millis(i64),
    Text(String),
    Invalid,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimeInput {
    Millis(i64),
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl From<RawTimeInput> for TimeInput {
    fn from(raw: RawTimeInput) -> Self {
        match raw {
            RawTimeInput::Millis(millis) => Self::Millis(millis),
            RawTimeInput::Number(value) => {
                millis_from_f64(value).map_or(Self::Invalid, Self::Millis)
            }
            RawTimeInput::Text(text) => Self::Text(text),
            RawTimeInput::Other(_) => Self::Invalid,
        }
    }
}

/// Whole milliseconds for `value`, `None` when it is not finite or does not fit `i64`.
fn millis_from_f64(value: f64) -> Option<TimePoint> {
    // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && in_range).then(|| value.trunc() as i64)
}

impl From<i64> for TimeInput {
    fn from(value: i64) -> Self {
        Self::Millis(value)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for TimeInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Millis(value.timestamp_millis())
    }
}

/// Point-shaped dataset element. Only `x` carries time for this axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PointDatum {
    #[serde(default)]
    pub x: Option<TimeInput>,
    #[serde(default)]
    pub y: Option<f64>,
}

/// One element of a dataset's `data` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Point(PointDatum),
    Value(f64),
    Null,
}

impl Datum {
    #[must_use]
    pub fn point(x: impl Into<TimeInput>, y: f64) -> Self {
        Self::Point(PointDatum {
            x: Some(x.into()),
            y: Some(y),
        })
    }

    /// Time source for this element when the dataset carries point data.
    ///
    /// Bare numbers are read as epoch milliseconds; `null` and numbers that
    /// are not finite or do not fit `i64` have no time.
    #[must_use]
    pub fn time_input(&self) -> Option<TimeInput> {
        match self {
            Self::Point(point) => point.x.clone(),
            Self::Value(value) => millis_from_f64(*value).map(TimeInput::Millis),
            Self::Null => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub data: Vec<Datum>,
    #[serde(default)]
    pub hidden: bool,
}

impl Dataset {
    #[must_use]
    pub fn new(data: Vec<Datum>) -> Self {
        Self {
            data,
            hidden: false,
        }
    }

    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// A dataset holds point data when its first element is a point object.
    #[must_use]
    pub fn has_point_data(&self) -> bool {
        matches!(self.data.first(), Some(Datum::Point(_)))
    }
}

/// Chart data consumed by the time-series axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<TimeInput>,
    #[serde(default)]
    pub x_labels: Option<Vec<TimeInput>>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    #[must_use]
    pub fn with_labels<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TimeInput>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Parses chart data JSON (`labels`, `xLabels`, `datasets`).
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        serde_json::from_str(json).map_err(|err| ChartError::InvalidData(err.to_string()))
    }

    /// Labels this axis reads: explicit x labels win over shared labels.
    #[must_use]
    pub fn axis_labels(&self) -> &[TimeInput] {
        self.x_labels.as_deref().unwrap_or(&self.labels)
    }
}

/// Axis placement in chart pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisGeometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl AxisGeometry {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}
