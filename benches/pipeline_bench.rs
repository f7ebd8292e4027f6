use criterion::{Criterion, criterion_group, criterion_main};
use indicator_charts::api::{Chart, ChartConfig, IndicatorLineChart, SectorTreemap};
use indicator_charts::core::{
    FieldReducer, FilterSpec, GroupOrder, PlotBounds, Record, TreemapConfig, Viewport, aggregate,
    fields, filter_records, key_by_field, key_by_year, layout_treemap,
};
use indicator_charts::interaction::{TooltipConfig, hover};
use std::hint::black_box;

const COUNTRIES: [&str; 6] = ["China", "Japan", "Germany", "India", "Brazil", "Kenya"];
const SECTORS: [&str; 5] = ["AI", "Cloud", "Robotics", "Semiconductors", "Fintech"];

fn dataset(len: usize) -> Vec<Record> {
    (0..len)
        .map(|i| {
            Record::new()
                .with(fields::COUNTRY, COUNTRIES[i % COUNTRIES.len()])
                .with(fields::YEAR, (2000 + (i % 25) as i32).to_string())
                .with(fields::TECH_SECTOR, SECTORS[i % SECTORS.len()])
                .with(fields::NETWORK_COVERAGE_5G, ((i * 7) % 100) as f64)
                .with(fields::INTERNET_PENETRATION, ((i * 13) % 100) as f64)
                .with(fields::TECH_EXPORTS_USD, 1_000.0 + (i % 97) as f64 * 250.0)
        })
        .collect()
}

fn bench_filter_and_aggregate_10k(c: &mut Criterion) {
    let records = dataset(10_000);
    let spec = FilterSpec::cleared()
        .with_country("China")
        .with_start_year(Some(2010));
    let reducers = [
        FieldReducer::mean(fields::NETWORK_COVERAGE_5G, "avg5G"),
        FieldReducer::mean(fields::INTERNET_PENETRATION, "avgInternet"),
    ];

    c.bench_function("filter_and_aggregate_10k", |b| {
        b.iter(|| {
            let filtered = filter_records(black_box(&records), &spec);
            let _ = aggregate(&filtered, key_by_year, &reducers, GroupOrder::Ascending);
        })
    });
}

fn bench_treemap_layout_10k(c: &mut Criterion) {
    let records = dataset(10_000);
    let bounds = PlotBounds::new(1_200.0, 800.0);

    c.bench_function("treemap_layout_10k", |b| {
        b.iter(|| {
            let _ = layout_treemap(
                black_box(&records),
                key_by_field(fields::TECH_SECTOR),
                fields::TECH_EXPORTS_USD,
                bounds,
                TreemapConfig::default(),
            );
        })
    });
}

fn bench_scene_and_hover(c: &mut Criterion) {
    let records = dataset(10_000);
    let config = ChartConfig::new(Viewport::new(1_280, 720));
    let line = IndicatorLineChart::connectivity("line", "China");
    let treemap = SectorTreemap::tech_exports("treemap");
    let scene = line.build_scene(&records, &config).expect("line scene");

    c.bench_function("line_and_treemap_scenes_10k", |b| {
        b.iter(|| {
            let _ = line.build_scene(black_box(&records), &config).expect("line scene");
            let _ = treemap
                .build_scene(black_box(&records), &config)
                .expect("treemap scene");
        })
    });

    c.bench_function("hover_line_scene", |b| {
        b.iter(|| {
            let _ = hover(
                black_box(320.0),
                black_box(180.0),
                &scene.items,
                TooltipConfig::default(),
            );
        })
    });
}

criterion_group!(
    benches,
    bench_filter_and_aggregate_10k,
    bench_treemap_layout_10k,
    bench_scene_and_hover
);
criterion_main!(benches);
