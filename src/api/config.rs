use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::TimeUnit;
use crate::error::{ChartError, ChartResult};

use super::label_format::is_valid_pattern;

/// Display pattern per unit.
///
/// Deserialized maps are merged over the defaults, so a partial map only
/// overrides the units it names; a unit mapped to `null` has no pattern.
/// Serialization writes every unit, with `null` for removed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<TimeUnit, Option<String>>",
    into = "BTreeMap<TimeUnit, Option<String>>"
)]
pub struct DisplayFormats {
    formats: BTreeMap<TimeUnit, String>,
}

impl DisplayFormats {
    /// No patterns at all; every lookup misses until `set` is called.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            formats: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, unit: TimeUnit) -> Option<&str> {
        self.formats.get(&unit).map(String::as_str)
    }

    pub fn set(&mut self, unit: TimeUnit, pattern: impl Into<String>) {
        self.formats.insert(unit, pattern.into());
    }

    pub fn remove(&mut self, unit: TimeUnit) -> Option<String> {
        self.formats.remove(&unit)
    }

    fn validate(&self) -> ChartResult<()> {
        for (unit, pattern) in &self.formats {
            if !is_valid_pattern(pattern) {
                return Err(ChartError::InvalidConfig(format!(
                    "display format for `{unit}` is not a valid strftime pattern: `{pattern}`"
                )));
            }
        }
        Ok(())
    }
}

impl Default for DisplayFormats {
    fn default() -> Self {
        let formats = TimeUnit::ALL
            .into_iter()
            .map(|unit| (unit, default_display_format(unit).to_owned()))
            .collect();
        Self { formats }
    }
}

impl From<BTreeMap<TimeUnit, Option<String>>> for DisplayFormats {
    fn from(overrides: BTreeMap<TimeUnit, Option<String>>) -> Self {
        let mut formats = Self::default();
        for (unit, pattern) in overrides {
            match pattern {
                Some(pattern) => formats.set(unit, pattern),
                None => {
                    formats.remove(unit);
                }
            }
        }
        formats
    }
}

impl From<DisplayFormats> for BTreeMap<TimeUnit, Option<String>> {
    fn from(mut formats: DisplayFormats) -> Self {
        TimeUnit::ALL
            .into_iter()
            .map(|unit| (unit, formats.remove(unit)))
            .collect()
    }
}

fn default_display_format(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Millisecond => "%-I:%M:%S%.3f %p",
        TimeUnit::Second => "%-I:%M:%S %p",
        TimeUnit::Minute => "%-I:%M %p",
        TimeUnit::Hour => "%-I%p",
        TimeUnit::Day | TimeUnit::Week => "%b %-d",
        TimeUnit::Month => "%b %Y",
        TimeUnit::Quarter => "Q{quarter} - %Y",
        TimeUnit::Year => "%Y",
    }
}

/// `time.*` options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    /// strftime pattern labels must match; `None` accepts ISO 8601 shapes.
    #[serde(default)]
    pub parser: Option<String>,
    /// Forced tick unit; `None` picks one from the data span.
    #[serde(default)]
    pub unit: Option<TimeUnit>,
    /// Truncates every parsed time to the start of this unit.
    #[serde(default)]
    pub round: Option<TimeUnit>,
    #[serde(default = "default_min_unit")]
    pub min_unit: TimeUnit,
    #[serde(default)]
    pub display_formats: DisplayFormats,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            parser: None,
            unit: None,
            round: None,
            min_unit: default_min_unit(),
            display_formats: DisplayFormats::default(),
        }
    }
}

/// `ticks.*` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOptions {
    /// Generic label auto-skipping. This axis decimates on its own and
    /// ignores the flag.
    #[serde(default)]
    pub auto_skip: bool,
}

/// `gridLines.*` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLineOptions {
    #[serde(default)]
    pub offset_grid_lines: bool,
}

/// Time-series axis configuration.
///
/// Serializable so hosts can keep axis setup next to the rest of their chart
/// options; keys follow the chart option naming (`minUnit`, `offsetGridLines`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesScaleConfig {
    #[serde(default)]
    pub time: TimeOptions,
    #[serde(default)]
    pub ticks: TickOptions,
    #[serde(default)]
    pub grid_lines: GridLineOptions,
    /// Font size used by the default label-capacity estimate.
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
}

impl Default for TimeSeriesScaleConfig {
    fn default() -> Self {
        Self {
            time: TimeOptions::default(),
            ticks: TickOptions::default(),
            grid_lines: GridLineOptions::default(),
            label_font_size_px: default_label_font_size_px(),
        }
    }
}

impl TimeSeriesScaleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.time.unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_min_unit(mut self, min_unit: TimeUnit) -> Self {
        self.time.min_unit = min_unit;
        self
    }

    #[must_use]
    pub fn with_round(mut self, round: TimeUnit) -> Self {
        self.time.round = Some(round);
        self
    }

    #[must_use]
    pub fn with_parser_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.time.parser = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_display_format(mut self, unit: TimeUnit, pattern: impl Into<String>) -> Self {
        self.time.display_formats.set(unit, pattern);
        self
    }

    #[must_use]
    pub fn with_offset_grid_lines(mut self, offset_grid_lines: bool) -> Self {
        self.grid_lines.offset_grid_lines = offset_grid_lines;
        self
    }

    #[must_use]
    pub fn with_label_font_size_px(mut self, font_size_px: f64) -> Self {
        self.label_font_size_px = font_size_px;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.label_font_size_px.is_finite() || self.label_font_size_px <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "label font size must be finite and > 0".to_owned(),
            ));
        }
        if let Some(pattern) = self.time.parser.as_deref() {
            if !is_valid_pattern(pattern) {
                return Err(ChartError::InvalidConfig(format!(
                    "time parser is not a valid strftime pattern: `{pattern}`"
                )));
            }
        }
        self.time.display_formats.validate()
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn default_min_unit() -> TimeUnit {
    TimeUnit::Millisecond
}

fn default_label_font_size_px() -> f64 {
    12.0
}
