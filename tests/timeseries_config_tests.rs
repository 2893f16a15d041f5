use chart_timeseries::api::{Axis, TimeSeriesScale, TimeSeriesScaleConfig};
use chart_timeseries::core::{AxisGeometry, ChartData, TimeUnit};
use chart_timeseries::{ChartError, telemetry};

#[test]
fn json_config_covers_documented_options() {
    let config = TimeSeriesScaleConfig::from_json_str(
        r#"{
            "time": {
                "parser": "%d/%m/%Y",
                "unit": "week",
                "round": "day",
                "minUnit": "hour",
                "displayFormats": {"week": "W%V %Y"}
            },
            "ticks": {"autoSkip": false},
            "gridLines": {"offsetGridLines": true},
            "labelFontSizePx": 14.0
        }"#,
    )
    .expect("valid config");

    assert_eq!(config.time.parser.as_deref(), Some("%d/%m/%Y"));
    assert_eq!(config.time.unit, Some(TimeUnit::Week));
    assert_eq!(config.time.round, Some(TimeUnit::Day));
    assert_eq!(config.time.min_unit, TimeUnit::Hour);
    assert_eq!(config.time.display_formats.get(TimeUnit::Week), Some("W%V %Y"));
    assert_eq!(config.time.display_formats.get(TimeUnit::Day), Some("%b %-d"));
    assert!(config.grid_lines.offset_grid_lines);
    assert_eq!(config.label_font_size_px, 14.0);
}

#[test]
fn empty_json_gives_defaults() {
    let config = TimeSeriesScaleConfig::from_json_str("{}").expect("valid config");
    assert_eq!(config, TimeSeriesScaleConfig::default());
    assert_eq!(config.time.min_unit, TimeUnit::Millisecond);
    assert!(!config.ticks.auto_skip);
}

#[test]
fn config_survives_json_round_trip() {
    let config = TimeSeriesScaleConfig::new()
        .with_unit(TimeUnit::Quarter)
        .with_display_format(TimeUnit::Quarter, "%Y Q{quarter}")
        .with_offset_grid_lines(true);

    let json = config.to_json_string().expect("serialize");
    let restored = TimeSeriesScaleConfig::from_json_str(&json).expect("deserialize");
    assert_eq!(restored, config);
}

#[test]
fn unknown_unit_is_a_config_error() {
    let result = TimeSeriesScaleConfig::from_json_str(r#"{"time": {"unit": "fortnight"}}"#);
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
}

#[test]
fn invalid_patterns_are_rejected() {
    let config = TimeSeriesScaleConfig::new().with_display_format(TimeUnit::Day, "%Q");
    assert!(matches!(
        TimeSeriesScale::new(config),
        Err(ChartError::InvalidConfig(_))
    ));

    let config = TimeSeriesScaleConfig::new().with_parser_pattern("%Y-%J");
    assert!(config.validate().is_err());
}

#[test]
fn non_positive_font_size_is_rejected() {
    for size in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let config = TimeSeriesScaleConfig::new().with_label_font_size_px(size);
        assert!(config.validate().is_err(), "size={size}");
    }
}

#[test]
fn auto_skip_is_accepted_but_has_no_effect() {
    let data = ChartData::with_labels(["2020-01-01", "2020-01-02", "2020-01-03"]);
    let geometry = AxisGeometry::new(0.0, 0.0, 2_000.0, 20.0);

    let mut plain = TimeSeriesScale::new(TimeSeriesScaleConfig::new()).expect("scale init");
    plain.layout(&data, geometry).expect("layout");

    let mut config = TimeSeriesScaleConfig::new();
    config.ticks.auto_skip = true;
    let mut skipping = TimeSeriesScale::new(config).expect("scale init");
    skipping.layout(&data, geometry).expect("layout");

    assert_eq!(plain.ticks(), skipping.ticks());
}

#[test]
fn default_tracing_init_requires_telemetry_feature() {
    if cfg!(feature = "telemetry") {
        return;
    }
    assert!(!telemetry::init_default_tracing());
}
