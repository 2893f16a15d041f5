use chart_timeseries::api::{
    Axis, EstimatedLabelCapacity, FixedLabelCapacity, TimeSeriesScale, TimeSeriesScaleConfig,
};
use chart_timeseries::core::{
    AxisGeometry, ChartData, Tick, TimeInput, TimePoint, TimeUnit, UnitResolver,
};
use chrono::{Duration, NaiveDate};

const DAY: i64 = 86_400_000;
const JAN_1_2020: i64 = 1_577_836_800_000;

fn geometry() -> AxisGeometry {
    AxisGeometry::new(40.0, 400.0, 800.0, 32.0)
}

fn daily_labels(count: i64) -> ChartData {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid start date");
    ChartData::with_labels(
        (0..count).map(|offset| (start + Duration::days(offset)).format("%Y-%m-%d").to_string()),
    )
}

fn laid_out(config: TimeSeriesScaleConfig, capacity: f64, data: &ChartData) -> TimeSeriesScale {
    let mut scale = TimeSeriesScale::new(config)
        .expect("scale init")
        .with_label_capacity(FixedLabelCapacity(capacity));
    scale.layout(data, geometry()).expect("layout");
    scale
}

fn indices(scale: &TimeSeriesScale) -> Vec<usize> {
    scale.ticks().indices().collect()
}

#[test]
fn three_days_above_capacity_threshold_show_every_day() {
    let config = TimeSeriesScaleConfig::new().with_min_unit(TimeUnit::Day);
    let scale = laid_out(config, 3.5, &daily_labels(3));

    assert_eq!(scale.unit(), Some(TimeUnit::Day));
    assert_eq!(scale.major_unit(), Some(TimeUnit::Week));
    assert_eq!(indices(&scale), vec![0, 1, 2]);
    // The first tick snaps back to the Sunday that opens the week.
    assert_eq!(scale.ticks().get(0), Some(Tick::new(JAN_1_2020 - 3 * DAY, 0)));
}

#[test]
fn capacity_equal_to_point_count_needs_gaps_above_one() {
    // Skip count is exactly 1.0 here and a plain point needs a larger gap.
    let config = TimeSeriesScaleConfig::new().with_min_unit(TimeUnit::Day);
    let scale = laid_out(config, 3.0, &daily_labels(3));

    assert_eq!(scale.master_timeline().len(), 3);
    assert_eq!(indices(&scale), vec![0, 2]);
}

#[test]
fn thousand_days_decimate_to_capacity_with_year_boundaries() {
    let scale = laid_out(TimeSeriesScaleConfig::new(), 10.0, &daily_labels(1000));

    assert_eq!(scale.unit(), Some(TimeUnit::Quarter));
    assert_eq!(scale.major_unit(), Some(TimeUnit::Year));
    assert_eq!(
        indices(&scale),
        vec![0, 101, 234, 366, 467, 599, 731, 832, 999]
    );

    let ticks = scale.ticks().as_slice();
    assert!(ticks.len() <= 12);
    assert!(ticks.windows(2).all(|pair| pair[0].timestamp < pair[1].timestamp));
    // Year starts replace the crowded ticks before them.
    assert_eq!(ticks[3].timestamp, JAN_1_2020 + 366 * DAY);
    assert_eq!(ticks[6].timestamp, JAN_1_2020 + 731 * DAY);
}

#[test]
fn final_point_is_always_represented() {
    for count in [2, 5, 17, 64, 365] {
        for capacity in [0.5, 1.0, 3.0, 7.5, 100.0] {
            let scale = laid_out(TimeSeriesScaleConfig::new(), capacity, &daily_labels(count));
            let last = scale.ticks().indices().last();
            assert_eq!(last, Some(count as usize - 1), "count={count} capacity={capacity}");
        }
    }
}

#[test]
fn explicit_unit_skips_resolution() {
    let config = TimeSeriesScaleConfig::new().with_unit(TimeUnit::Year);
    let scale = laid_out(config, 10.0, &daily_labels(30));

    assert_eq!(scale.unit(), Some(TimeUnit::Year));
    assert_eq!(scale.major_unit(), None);
    // Without a major unit the first tick keeps its own time.
    assert_eq!(scale.ticks().get(0), Some(Tick::new(JAN_1_2020, 0)));
    assert_eq!(scale.display_format(), Some("%Y"));
    assert_eq!(scale.major_display_format(), None);
}

#[test]
fn min_unit_floors_automatic_unit() {
    let data = ChartData::with_labels([TimeInput::Millis(0), TimeInput::Millis(250)]);
    let scale = laid_out(TimeSeriesScaleConfig::new(), 10.0, &data);
    assert_eq!(scale.unit(), Some(TimeUnit::Millisecond));

    let config = TimeSeriesScaleConfig::new().with_min_unit(TimeUnit::Minute);
    let scale = laid_out(config, 10.0, &data);
    assert_eq!(scale.unit(), Some(TimeUnit::Minute));
    assert_eq!(scale.display_format(), Some("%-I:%M %p"));
    assert_eq!(scale.major_display_format(), Some("%-I%p"));
}

struct CountingResolver;

impl UnitResolver for CountingResolver {
    fn determine_unit(
        &self,
        _min_unit: TimeUnit,
        min: TimePoint,
        max: TimePoint,
        capacity: f64,
    ) -> TimeUnit {
        assert_eq!((min, max), (JAN_1_2020, JAN_1_2020 + 9 * DAY));
        assert_eq!(capacity, 4.0);
        TimeUnit::Hour
    }

    fn major_unit(&self, _unit: TimeUnit) -> Option<TimeUnit> {
        None
    }
}

#[test]
fn injected_unit_resolver_receives_span_and_capacity() {
    let mut scale = TimeSeriesScale::new(TimeSeriesScaleConfig::new())
        .expect("scale init")
        .with_unit_resolver(CountingResolver)
        .with_label_capacity(FixedLabelCapacity(4.0));
    scale.layout(&daily_labels(10), geometry()).expect("layout");

    assert_eq!(scale.unit(), Some(TimeUnit::Hour));
    assert_eq!(scale.major_unit(), None);
    // Skip count 2.5 keeps every third day.
    assert_eq!(indices(&scale), vec![0, 3, 6, 9]);
}

#[test]
fn default_capacity_follows_axis_width() {
    let data = daily_labels(200);
    let mut narrow = TimeSeriesScale::new(TimeSeriesScaleConfig::new()).expect("scale init");
    narrow
        .layout(&data, AxisGeometry::new(0.0, 0.0, 200.0, 20.0))
        .expect("layout");
    let mut wide = TimeSeriesScale::new(TimeSeriesScaleConfig::new()).expect("scale init");
    wide
        .layout(&data, AxisGeometry::new(0.0, 0.0, 4_000.0, 20.0))
        .expect("layout");

    assert!(narrow.ticks().len() < wide.ticks().len());
    assert!(narrow.ticks().len() >= 1);
}

#[test]
fn estimated_capacity_uses_millisecond_pattern() {
    let capacity = EstimatedLabelCapacity::new("%-I:%M:%S%.3f %p", 12.0);
    let mut scale = TimeSeriesScale::new(TimeSeriesScaleConfig::new())
        .expect("scale init")
        .with_label_capacity(capacity);
    scale
        .layout(&daily_labels(50), AxisGeometry::new(0.0, 0.0, 0.0, 20.0))
        .expect("layout");

    // A zero-width axis fits no labels: only the final point survives.
    assert_eq!(indices(&scale), vec![49]);
}

#[test]
fn tick_labels_use_major_format_on_boundaries() {
    let config = TimeSeriesScaleConfig::new()
        .with_unit(TimeUnit::Day)
        .with_display_format(TimeUnit::Week, "Week of %b %-d");
    let scale = laid_out(config, 100.0, &daily_labels(7));

    assert_eq!(
        scale.tick_labels(),
        vec![
            "Week of Dec 29",
            "Jan 2",
            "Jan 3",
            "Jan 4",
            "Week of Jan 5",
            "Jan 6",
            "Jan 7",
        ]
    );
}

#[test]
fn missing_display_format_yields_empty_labels() {
    let mut config = TimeSeriesScaleConfig::new().with_unit(TimeUnit::Day);
    config.time.display_formats.remove(TimeUnit::Day);
    let scale = laid_out(config, 100.0, &daily_labels(3));

    assert_eq!(scale.display_format(), None);
    // Dec 29 sits on a week boundary and still gets the week pattern.
    assert_eq!(scale.tick_labels(), vec!["Dec 29", "", ""]);
}

#[test]
fn quarter_labels_use_quarter_token() {
    let config = TimeSeriesScaleConfig::new().with_unit(TimeUnit::Month);
    let data = ChartData::with_labels(["2020-02-10", "2020-05-20"]);
    let scale = laid_out(config, 10.0, &data);

    assert_eq!(scale.major_unit(), Some(TimeUnit::Quarter));
    assert_eq!(scale.tick_labels(), vec!["Q1 - 2020", "Q2 - 2020"]);
}
