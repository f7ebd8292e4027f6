use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::primitives::{parse_number, year_to_unix_seconds};
use crate::core::record::Record;

/// Group identity produced by a grouping key function.
///
/// Ordering is numeric for years and lexicographic for categories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryKey {
    Year(i32),
    Category(String),
}

impl CategoryKey {
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Position of the key on a time axis: unix seconds at the start of the year.
    #[must_use]
    pub fn time_value(&self) -> Option<f64> {
        match self {
            Self::Year(year) => year_to_unix_seconds(*year),
            Self::Category(_) => None,
        }
    }

    /// Position of the key on a numeric axis.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Year(year) => Some(f64::from(*year)),
            Self::Category(name) => parse_number(name),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Category(name) => f.write_str(name),
        }
    }
}

/// Groups by the record's `Year` column; unparseable years have no key.
#[must_use]
pub fn key_by_year(record: &Record) -> Option<CategoryKey> {
    record.year().map(CategoryKey::Year)
}

/// Groups by the textual value of `field`; records without it have no key.
pub fn key_by_field(field: &str) -> impl Fn(&Record) -> Option<CategoryKey> + '_ {
    move |record| {
        record
            .text(field)
            .map(|value| CategoryKey::Category(value.into_owned()))
    }
}

/// Reduced statistic for one category/time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedPoint {
    pub key: CategoryKey,
    pub values: IndexMap<String, f64>,
}

impl AggregatedPoint {
    #[must_use]
    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reducer {
    /// Mean over valid samples; a group with no valid samples reduces to 0.
    Mean,
    /// Sum with absent samples counted as 0.
    Sum,
}

/// Reduces `source` into `output` for every group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReducer {
    pub source: String,
    pub output: String,
    pub reducer: Reducer,
}

impl FieldReducer {
    #[must_use]
    pub fn mean(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            reducer: Reducer::Mean,
        }
    }

    #[must_use]
    pub fn sum(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            reducer: Reducer::Sum,
        }
    }
}

/// Emission order of aggregated groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupOrder {
    /// Order of each group's first record.
    #[default]
    FirstSeen,
    /// Ascending by `CategoryKey`.
    Ascending,
}

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.count += 1;
        }
    }

    fn finish(self, reducer: Reducer) -> f64 {
        match reducer {
            Reducer::Sum => self.sum,
            Reducer::Mean if self.count == 0 => 0.0,
            Reducer::Mean => self.sum / self.count as f64,
        }
    }
}

/// Groups records by `key_fn` and reduces each configured field per group.
pub fn aggregate<F>(
    records: &[Record],
    key_fn: F,
    reducers: &[FieldReducer],
    order: GroupOrder,
) -> Vec<AggregatedPoint>
where
    F: Fn(&Record) -> Option<CategoryKey>,
{
    let mut groups: IndexMap<CategoryKey, Vec<Accumulator>> = IndexMap::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(key) = key_fn(record) else {
            skipped += 1;
            continue;
        };
        let accumulators = groups
            .entry(key)
            .or_insert_with(|| vec![Accumulator::default(); reducers.len()]);
        for (accumulator, reducer) in accumulators.iter_mut().zip(reducers) {
            accumulator.push(record.number(&reducer.source));
        }
    }

    if skipped > 0 {
        trace!(skipped, "records without group key skipped");
    }

    let mut points: Vec<AggregatedPoint> = groups
        .into_iter()
        .map(|(key, accumulators)| AggregatedPoint {
            key,
            values: reducers
                .iter()
                .zip(accumulators)
                .map(|(reducer, accumulator)| {
                    (reducer.output.clone(), accumulator.finish(reducer.reducer))
                })
                .collect(),
        })
        .collect();

    if order == GroupOrder::Ascending {
        points.sort_by(|a, b| a.key.cmp(&b.key));
    }

    debug!(
        record_count = records.len(),
        group_count = points.len(),
        "aggregate records"
    );
    points
}

/// Builds one point per keyed record carrying only the fields present on it.
///
/// Used where each record is plotted individually (scatter charts).
pub fn project_records<F>(records: &[Record], key_fn: F, fields: &[&str]) -> Vec<AggregatedPoint>
where
    F: Fn(&Record) -> Option<CategoryKey>,
{
    records
        .iter()
        .filter_map(|record| {
            let key = key_fn(record)?;
            let values = fields
                .iter()
                .filter_map(|field| record.number(field).map(|value| ((*field).to_owned(), value)))
                .collect();
            Some(AggregatedPoint { key, values })
        })
        .collect()
}

/// Keeps only points whose `field` is present and strictly positive.
///
/// Every log-scale domain is computed from the output of this function.
#[must_use]
pub fn retain_positive(points: Vec<AggregatedPoint>, field: &str) -> Vec<AggregatedPoint> {
    let before = points.len();
    let kept: Vec<AggregatedPoint> = points
        .into_iter()
        .filter(|point| point.value(field).is_some_and(|value| value > 0.0))
        .collect();
    if kept.len() < before {
        warn!(
            field,
            dropped = before - kept.len(),
            "dropped non-positive values before log domain"
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::{
        CategoryKey, FieldReducer, GroupOrder, aggregate, key_by_field, key_by_year,
        project_records, retain_positive,
    };
    use crate::core::record::{Record, fields};

    #[test]
    fn mean_ignores_invalid_samples_and_falls_back_to_zero() {
        let records = vec![
            Record::new()
                .with(fields::YEAR, "2021")
                .with(fields::NETWORK_COVERAGE_5G, "30")
                .with(fields::INTERNET_PENETRATION, "x"),
            Record::new()
                .with(fields::YEAR, "2021")
                .with(fields::NETWORK_COVERAGE_5G, "")
                .with(fields::INTERNET_PENETRATION, "n/a"),
        ];
        let points = aggregate(
            &records,
            key_by_year,
            &[
                FieldReducer::mean(fields::NETWORK_COVERAGE_5G, "avg5G"),
                FieldReducer::mean(fields::INTERNET_PENETRATION, "avgInternet"),
            ],
            GroupOrder::FirstSeen,
        );

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value("avg5G"), Some(30.0));
        assert_eq!(points[0].value("avgInternet"), Some(0.0));
    }

    #[test]
    fn groups_follow_requested_order() {
        let records: Vec<Record> = ["2022", "2020", "2021", "2020"]
            .into_iter()
            .map(|year| Record::new().with(fields::YEAR, year))
            .collect();

        let first_seen = aggregate(&records, key_by_year, &[], GroupOrder::FirstSeen);
        let keys: Vec<CategoryKey> = first_seen.into_iter().map(|point| point.key).collect();
        assert_eq!(
            keys,
            [CategoryKey::Year(2022), CategoryKey::Year(2020), CategoryKey::Year(2021)]
        );

        let ascending = aggregate(&records, key_by_year, &[], GroupOrder::Ascending);
        let keys: Vec<CategoryKey> = ascending.into_iter().map(|point| point.key).collect();
        assert_eq!(
            keys,
            [CategoryKey::Year(2020), CategoryKey::Year(2021), CategoryKey::Year(2022)]
        );
    }

    #[test]
    fn projection_keeps_only_present_fields_and_positive_filter_drops_rest() {
        let records = vec![
            Record::new()
                .with(fields::COUNTRY, "Japan")
                .with(fields::UNIVERSITY_COLLABORATIONS, "0")
                .with(fields::STARTUP_COUNT, "10"),
            Record::new()
                .with(fields::COUNTRY, "China")
                .with(fields::UNIVERSITY_COLLABORATIONS, "25")
                .with(fields::STARTUP_COUNT, "bad"),
            Record::new().with(fields::COUNTRY, "Korea"),
        ];
        let points = project_records(
            &records,
            key_by_field(fields::COUNTRY),
            &[fields::UNIVERSITY_COLLABORATIONS, fields::STARTUP_COUNT],
        );
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].value(fields::STARTUP_COUNT), None);

        let positive = retain_positive(points, fields::UNIVERSITY_COLLABORATIONS);
        assert_eq!(positive.len(), 1);
        assert_eq!(positive[0].key, CategoryKey::Category("China".to_owned()));
    }
}
