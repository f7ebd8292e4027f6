use indicator_charts::api::{
    Chart, ChartConfig, Dashboard, IndicatorLineChart, MAX_TICK_COUNT, SectorTreemap,
};
use indicator_charts::core::{
    DEFAULT_MARGIN, GeometryItem, Margin, Record, TreemapConfig, Viewport, fields,
};
use indicator_charts::interaction::TooltipConfig;
use indicator_charts::render::NullRenderer;

#[test]
fn json_config_fills_documented_defaults() {
    let config = ChartConfig::from_json_str(r#"{"viewport": {"width": 640, "height": 360}}"#)
        .expect("valid config");

    assert_eq!(config.viewport, Viewport::new(640, 360));
    assert_eq!(config.margin, DEFAULT_MARGIN);
    assert_eq!((config.x_tick_count, config.y_tick_count), (10, 10));
    assert_eq!(config.tooltip, TooltipConfig::default());
    assert_eq!(config.treemap, TreemapConfig::default());
    assert_eq!(config.bounds().width, 550.0);
    assert_eq!(config.bounds().height, 280.0);
}

#[test]
fn oversized_tick_counts_are_rejected() {
    let huge = format!(
        r#"{{"viewport": {{"width": 640, "height": 360}}, "x_tick_count": {}}}"#,
        usize::MAX
    );
    assert!(ChartConfig::from_json_str(&huge).is_err());

    let config = ChartConfig::new(Viewport::new(640, 360));
    assert!(config.with_tick_counts(MAX_TICK_COUNT, 5).validate().is_ok());
    assert!(
        config
            .with_tick_counts(5, MAX_TICK_COUNT + 1)
            .validate()
            .is_err()
    );
}

#[test]
fn chart_rejects_unvalidated_tick_counts() {
    let records = vec![
        Record::new()
            .with(fields::COUNTRY, "China")
            .with(fields::YEAR, "2020")
            .with(fields::NETWORK_COVERAGE_5G, "40"),
    ];
    let config = ChartConfig::new(Viewport::new(640, 360)).with_tick_counts(5_000_000, 5);

    let result = IndicatorLineChart::connectivity("line", "China").build_scene(&records, &config);
    assert!(result.is_err());
}

#[test]
fn negative_margin_and_padding_are_rejected() {
    let config = ChartConfig::new(Viewport::new(640, 360));
    assert!(
        config
            .with_margin(Margin::new(-1.0, 0.0, 0.0, 0.0))
            .validate()
            .is_err()
    );
    assert!(
        config
            .with_treemap(TreemapConfig { padding: -2.0 })
            .validate()
            .is_err()
    );
    assert!(
        config
            .with_tooltip(TooltipConfig {
                offset_x: f64::NAN,
                offset_y: 0.0,
            })
            .validate()
            .is_err()
    );
}

#[test]
fn margin_and_y_domain_shape_line_geometry() {
    let records = vec![
        Record::new()
            .with(fields::COUNTRY, "China")
            .with(fields::YEAR, "2020")
            .with(fields::NETWORK_COVERAGE_5G, "25"),
    ];
    let config = ChartConfig::new(Viewport::new(200, 100))
        .with_margin(Margin::new(0.0, 0.0, 0.0, 0.0))
        .with_tick_counts(2, 2);
    let chart = IndicatorLineChart::connectivity("line", "China").with_y_domain(0.0, 50.0);

    let scene = chart.build_scene(&records, &config).expect("scene");
    assert_eq!(scene.origin(), (0.0, 0.0));
    let first_point = scene
        .items
        .iter()
        .find_map(|item| match item {
            GeometryItem::Point { x, y, .. } => Some((*x, *y)),
            _ => None,
        })
        .expect("point");
    // Single year sits mid-axis; 25 of [0, 50] sits mid-height.
    assert_eq!(first_point, (100.0, 50.0));
}

#[test]
fn year_range_setters_and_renderer_handoff() {
    let records = vec![
        Record::new()
            .with(fields::TECH_SECTOR, "AI")
            .with(fields::YEAR, "2019")
            .with(fields::TECH_EXPORTS_USD, 10.0),
        Record::new()
            .with(fields::TECH_SECTOR, "Cloud")
            .with(fields::YEAR, "2023")
            .with(fields::TECH_EXPORTS_USD, 20.0),
    ];
    let mut dashboard = Dashboard::new(NullRenderer::default(), records);
    dashboard
        .add_chart(
            Box::new(SectorTreemap::tech_exports("treemap")),
            ChartConfig::new(Viewport::new(400, 300)),
        )
        .expect("treemap chart");

    dashboard.set_end_year(Some(2020));
    assert_eq!(dashboard.filtered_records().len(), 1);
    dashboard.render_all().expect("render");

    let renderer = dashboard.into_renderer();
    assert_eq!(renderer.render_count, 1);
    assert_eq!(renderer.last_rect_count, 1);
}
