use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::record::{Record, fields};

/// Categorical filter dimension: either everything or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected.as_str()),
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<&str> for CategoryFilter {
    /// Dropdown values arrive as text; `"all"` selects every category.
    fn from(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value.to_owned())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

/// Filter selection applied to the full record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub sector: CategoryFilter,
    pub country: CategoryFilter,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl FilterSpec {
    /// Identity filter: every dimension set to "all", no year bounds.
    #[must_use]
    pub fn cleared() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<CategoryFilter>) -> Self {
        self.sector = sector.into();
        self
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<CategoryFilter>) -> Self {
        self.country = country.into();
        self
    }

    #[must_use]
    pub fn with_start_year(mut self, start_year: Option<i32>) -> Self {
        self.start_year = start_year;
        self
    }

    #[must_use]
    pub fn with_end_year(mut self, end_year: Option<i32>) -> Self {
        self.end_year = end_year;
        self
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.sector.is_all()
            && self.country.is_all()
            && self.start_year.is_none()
            && self.end_year.is_none()
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.sector.matches(record.sector().as_deref())
            && self.country.matches(record.country().as_deref())
            && self.matches_year(record)
    }

    fn matches_year(&self, record: &Record) -> bool {
        if self.start_year.is_none() && self.end_year.is_none() {
            return true;
        }
        let Some(year) = record.year() else {
            return false;
        };
        self.start_year.is_none_or(|start| year >= start)
            && self.end_year.is_none_or(|end| year <= end)
    }
}

/// Returns the records accepted by `spec`, preserving input order.
#[must_use]
pub fn filter_records(records: &[Record], spec: &FilterSpec) -> Vec<Record> {
    let filtered: Vec<Record> = records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect();
    debug!(
        input_count = records.len(),
        output_count = filtered.len(),
        "filter records"
    );
    filtered
}

/// Option lists for the filter dropdowns, derived from the full record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Distinct sectors in first-seen order.
    pub sectors: Vec<String>,
    /// Distinct countries in first-seen order.
    pub countries: Vec<String>,
    /// Distinct parseable years, newest first.
    pub years: Vec<i32>,
}

impl FilterOptions {
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let mut sectors = IndexSet::new();
        let mut countries = IndexSet::new();
        let mut years = IndexSet::new();
        for record in records {
            if let Some(sector) = record.text(fields::TECH_SECTOR) {
                sectors.insert(sector.into_owned());
            }
            if let Some(country) = record.text(fields::COUNTRY) {
                countries.insert(country.into_owned());
            }
            if let Some(year) = record.year() {
                years.insert(year);
            }
        }

        let mut years: Vec<i32> = years.into_iter().collect();
        years.sort_unstable_by(|a, b| b.cmp(a));

        Self {
            sectors: sectors.into_iter().collect(),
            countries: countries.into_iter().collect(),
            years,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryFilter, FilterOptions, FilterSpec, filter_records};
    use crate::core::record::{Record, fields};

    fn row(country: &str, sector: &str, year: &str) -> Record {
        Record::new()
            .with(fields::COUNTRY, country)
            .with(fields::TECH_SECTOR, sector)
            .with(fields::YEAR, year)
    }

    #[test]
    fn all_text_maps_to_all_filter() {
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("Japan"),
            CategoryFilter::Only("Japan".to_owned())
        );
    }

    #[test]
    fn unparseable_year_is_excluded_only_under_year_bounds() {
        let records = vec![row("China", "AI", "2020"), row("China", "AI", "unknown")];

        let identity = filter_records(&records, &FilterSpec::cleared());
        assert_eq!(identity.len(), 2);

        let bounded = filter_records(&records, &FilterSpec::cleared().with_start_year(Some(2000)));
        assert_eq!(bounded, vec![records[0].clone()]);
    }

    #[test]
    fn options_list_years_newest_first() {
        let records = vec![
            row("China", "AI", "2018"),
            row("Japan", "Robotics", "2021"),
            row("China", "AI", "2019"),
            row("Japan", "AI", "bad"),
        ];
        let options = FilterOptions::from_records(&records);
        assert_eq!(options.sectors, ["AI", "Robotics"]);
        assert_eq!(options.countries, ["China", "Japan"]);
        assert_eq!(options.years, [2021, 2019, 2018]);
    }
}
