use approx::assert_relative_eq;
use indicator_charts::core::{
    AggregatedPoint, CategoryKey, Color, GeometryItem, LayoutRect, ScaleKind, SeriesStyle,
    TickFormat, ValueSource, build_scale, emit_series,
};

#[test]
fn built_scales_report_kind_and_tick_format() {
    let cases = [
        (ScaleKind::Linear, (0.0, 100.0), TickFormat::Plain),
        (ScaleKind::Log, (1.0, 1_000.0), TickFormat::Si),
        (ScaleKind::Time, (0.0, 86_400.0), TickFormat::Year),
    ];
    for (kind, domain, format) in cases {
        let scale = build_scale(kind, domain, (0.0, 500.0)).expect("valid scale");
        assert_eq!(scale.kind(), kind);
        assert_eq!(scale.default_tick_format(), format);
        assert_eq!(scale.domain(), domain);
        assert_eq!(scale.range(), (0.0, 500.0));
    }
}

#[test]
fn continuous_scales_invert_their_mapping() {
    let linear = build_scale(ScaleKind::Linear, (10.0, 110.0), (400.0, 0.0)).expect("linear");
    let px = linear.map(42.5).expect("to pixel");
    assert_relative_eq!(linear.invert(px).expect("from pixel"), 42.5, epsilon = 1e-9);

    let log = build_scale(ScaleKind::Log, (1.0, 10_000.0), (0.0, 800.0)).expect("log");
    assert_relative_eq!(log.map(100.0).expect("to pixel"), 400.0, epsilon = 1e-9);
    assert_relative_eq!(log.invert(400.0).expect("from pixel"), 100.0, epsilon = 1e-9);
}

#[test]
fn log_scale_rejects_non_positive_domain_and_input() {
    assert!(build_scale(ScaleKind::Log, (0.0, 10.0), (0.0, 100.0)).is_err());
    let log = build_scale(ScaleKind::Log, (1.0, 10.0), (0.0, 100.0)).expect("log");
    assert!(log.map(0.0).is_err());
    assert!(log.map(-5.0).is_err());
}

#[test]
fn zero_span_domain_maps_to_range_midpoint() {
    let scale = build_scale(ScaleKind::Linear, (7.0, 7.0), (0.0, 300.0)).expect("linear");
    assert_eq!(scale.map(7.0).expect("mapped"), 150.0);
}

#[test]
fn series_style_radius_reaches_points() {
    let points = vec![AggregatedPoint {
        key: CategoryKey::Category("China".to_owned()),
        values: [("x".to_owned(), 5.0), ("y".to_owned(), 2.0)]
            .into_iter()
            .collect(),
    }];
    let x = build_scale(ScaleKind::Linear, (0.0, 10.0), (0.0, 100.0)).expect("x");
    let y = build_scale(ScaleKind::Linear, (0.0, 4.0), (100.0, 0.0)).expect("y");
    let style = SeriesStyle::line("Startups", Color::GREEN).with_radius(7.0);

    let items = emit_series(
        &points,
        &ValueSource::field("x"),
        &ValueSource::field("y"),
        x,
        y,
        &style,
    )
    .expect("series");

    assert!(matches!(items[0], GeometryItem::PathSegment { .. }));
    let GeometryItem::Point { x, y, radius, .. } = &items[1] else {
        panic!("expected point");
    };
    assert_eq!((*x, *y, *radius), (50.0, 50.0, 7.0));
}

#[test]
fn layout_rect_contains_its_edges() {
    let rect = LayoutRect::new(10.0, 20.0, 30.0, 60.0);
    assert!(rect.contains(10.0, 20.0));
    assert!(rect.contains(30.0, 60.0));
    assert!(!rect.contains(31.0, 40.0));
    assert_eq!(rect.area(), 800.0);
}
