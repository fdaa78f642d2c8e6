//! Tabulation of simulation output timeseries into load tables, as used to hand building loads
//! over to district system models.

use chrono::{Datelike, NaiveDateTime, Timelike};
use indexmap::IndexMap;
use strum::Display;
use tracing::{debug, warn};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeseries {
    pub date_times: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

/// Somewhere simulation output variables can be read from, such as a results database.
pub trait TimeseriesSource {
    fn time_series(
        &self,
        environment_period: &str,
        reporting_frequency: &str,
        variable_name: &str,
        key_value: Option<&str>,
    ) -> Option<Timeseries>;
}

/// Which values of the source columns contribute to a summed column.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum SignFilter {
    #[default]
    All,
    PositiveOnly,
    NegativeOnly,
}

impl SignFilter {
    fn admits(self, value: f64) -> bool {
        match self {
            SignFilter::All => true,
            SignFilter::PositiveOnly => value > 0.,
            SignFilter::NegativeOnly => value < 0.,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalendarRow {
    pub date_time: NaiveDateTime,
    pub month: u32,
    pub day: u32,
    /// ISO numbering, Monday is 1.
    pub day_of_week: u32,
    pub hour: u32,
    pub minute: u32,
    pub seconds_from_start: i64,
}

/// What to read for one column of a [`LoadTable`].
#[derive(Clone, Debug)]
pub struct ColumnRequest<'a> {
    pub environment_period: &'a str,
    pub reporting_frequency: &'a str,
    pub variable_name: &'a str,
    pub key_value: Option<&'a str>,
    /// Defaults to the variable name joined to the key value.
    pub column_name: Option<&'a str>,
    /// Used for every row when the source has no such series.
    pub default_if_empty: f64,
    pub decimal_places: Option<i32>,
}

impl<'a> ColumnRequest<'a> {
    pub fn new(variable_name: &'a str) -> Self {
        Self {
            environment_period: "RUN PERIOD 1",
            reporting_frequency: "Zone Timestep",
            variable_name,
            key_value: None,
            column_name: None,
            default_if_empty: 0.,
            decimal_places: None,
        }
    }

    /// `<variable>_<key>` (or just the variable) unless a name was given, with `:` and spaces
    /// removed.
    fn resolved_column_name(&self) -> String {
        let name = match (self.column_name, self.key_value) {
            (Some(column_name), _) => column_name.to_string(),
            (None, Some(key_value)) => format!("{}_{key_value}", self.variable_name),
            (None, None) => self.variable_name.to_string(),
        };

        name.chars().filter(|c| *c != ':' && *c != ' ').collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeakLoads {
    /// Most negative cooling load, or zero.
    pub cooling: Option<f64>,
    pub heating: Option<f64>,
    pub water_heating: Option<f64>,
}

/// Columns of equal length sharing one time index.
#[derive(Clone, Debug, Default)]
pub struct LoadTable {
    rows: Vec<CalendarRow>,
    columns: IndexMap<String, Vec<f64>>,
}

impl LoadTable {
    /// Builds the time index from the timestamps of a reference series. Seconds from start are
    /// counted from the first timestamp and shifted by `timestep_seconds`, so the first row ends
    /// one timestep into the simulation.
    pub fn from_reference(reference: &Timeseries, timestep_seconds: i64) -> Self {
        let rows = match reference.date_times.first() {
            Some(start) => reference
                .date_times
                .iter()
                .map(|date_time| CalendarRow {
                    date_time: *date_time,
                    month: date_time.month(),
                    day: date_time.day(),
                    day_of_week: date_time.weekday().number_from_monday(),
                    hour: date_time.hour(),
                    minute: date_time.minute(),
                    seconds_from_start: (*date_time - *start).num_seconds() + timestep_seconds,
                })
                .collect(),
            None => vec![],
        };

        Self {
            rows,
            columns: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CalendarRow] {
        &self.rows
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Reads one series from `source` into a new column and returns the column's name, or `None`
    /// if the series was left out because it did not line up with the time index or its column
    /// name is already taken.
    ///
    /// Missing series are not an error: the column is filled with the request's default.
    pub fn extract(
        &mut self,
        source: &impl TimeseriesSource,
        request: &ColumnRequest,
    ) -> Option<String> {
        let column_name = request.resolved_column_name();
        if self.columns.contains_key(&column_name) {
            warn!("column {column_name} already exists, leaving out {}", request.variable_name);
            return None;
        }

        let values = match source.time_series(
            request.environment_period,
            request.reporting_frequency,
            request.variable_name,
            request.key_value,
        ) {
            Some(series) => series
                .values
                .into_iter()
                .map(|value| match request.decimal_places {
                    Some(places) => round_to(value, places),
                    None => value,
                })
                .collect::<Vec<_>>(),
            None => {
                warn!(
                    "no timeseries for {}:{}, defaulting to {}",
                    request.variable_name,
                    request.key_value.unwrap_or_default(),
                    request.default_if_empty
                );
                vec![request.default_if_empty; self.len()]
            }
        };

        if values.len() != self.len() {
            warn!(
                "timeseries for {} has {} values but the table has {} rows, leaving it out",
                request.variable_name,
                values.len(),
                self.len()
            );
            return None;
        }

        debug!("extracted column {column_name}");
        self.columns.insert(column_name.clone(), values);

        Some(column_name)
    }

    /// Adds a column summing, row by row, every existing column whose name contains `include`.
    /// Sums are rounded to one decimal place.
    pub fn add_sum_column(&mut self, name: &str, include: &str, filter: SignFilter) {
        let sums = (0..self.len())
            .map(|row| {
                self.columns
                    .iter()
                    .filter(|(column_name, _)| column_name.contains(include))
                    .map(|(_, values)| values[row])
                    .filter(|value| filter.admits(*value))
                    .sum::<f64>()
            })
            .map(|sum| round_to(sum, 1))
            .collect::<Vec<_>>();

        self.columns.insert(name.to_string(), sums);
    }

    pub fn peak_loads(
        &self,
        cooling_column: &str,
        heating_column: &str,
        water_heating_column: &str,
    ) -> PeakLoads {
        // peaks are measured from zero, so cooling never peaks above it nor heating below it
        let extreme = |name: &str, pick: fn(f64, f64) -> f64| {
            self.column(name)
                .map(|values| values.iter().copied().fold(0., pick))
        };

        PeakLoads {
            cooling: extreme(cooling_column, f64::min),
            heating: extreme(heating_column, f64::max),
            water_heating: extreme(water_heating_column, f64::max),
        }
    }
}

fn round_to(value: f64, decimal_places: i32) -> f64 {
    let factor = 10f64.powi(decimal_places);
    (value * factor).round() / factor
}
