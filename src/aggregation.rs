//! Date-keyed aggregation over daily observations.
//!
//! Everything here is a pure function over borrowed [`Measurement`] records.
//! Dates are compared as `YYYY-MM-DD` strings, whose lexical order is their
//! chronological order.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::db::Measurement;

/// Number of trailing distinct dates reported as "the last year" of data.
pub const LAST_YEAR_DATE_COUNT: usize = 365;

/// Date-ordered mapping of `YYYY-MM-DD` to a daily value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DailySeries(pub BTreeMap<String, f64>);

impl DailySeries {
    pub fn get(&self, date: &str) -> Option<f64> {
        self.0.get(date).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Inclusive date bounds. A missing `end` leaves the range open above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: Option<String>) -> Self {
        Self {
            start: start.into(),
            end,
        }
    }

    pub fn starting_at(start: impl Into<String>) -> Self {
        Self::new(start, None)
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::new(start, Some(end.into()))
    }

    pub fn contains(&self, date: &str) -> bool {
        date >= self.start.as_str() && self.end.as_deref().map_or(true, |end| date <= end)
    }

    /// True when `end` sorts before `start`, so no date can fall inside.
    pub fn is_inverted(&self) -> bool {
        self.end
            .as_deref()
            .is_some_and(|end| end < self.start.as_str())
    }
}

/// Minimum, maximum and mean temperature over a set of records.
///
/// Each statistic is `None` when no record in the set carried a temperature,
/// which serializes as `null` rather than a misleading zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct TemperatureStats {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub average: Option<f64>,
}

impl TemperatureStats {
    pub fn from_temperatures<I>(temperatures: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut stats = Self::default();
        let mut total = 0.0;
        let mut count = 0usize;

        for value in temperatures {
            stats.minimum = Some(stats.minimum.map_or(value, |min| min.min(value)));
            stats.maximum = Some(stats.maximum.map_or(value, |max| max.max(value)));
            total += value;
            count += 1;
        }

        if count > 0 {
            stats.average = Some(total / count as f64);
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.average.is_none()
    }
}

/// Group records by date, in ascending date order.
pub fn group_by_date<'a, I>(records: I) -> BTreeMap<&'a str, Vec<&'a Measurement>>
where
    I: IntoIterator<Item = &'a Measurement>,
{
    let mut groups: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for record in records {
        groups.entry(record.date.as_str()).or_default().push(record);
    }
    groups
}

/// The `count` chronologically latest groups.
fn latest_groups<'a>(
    groups: BTreeMap<&'a str, Vec<&'a Measurement>>,
    count: usize,
) -> impl Iterator<Item = (&'a str, Vec<&'a Measurement>)> {
    let skip = groups.len().saturating_sub(count);
    groups.into_iter().skip(skip)
}

/// Total precipitation per date over the `count` latest dates in `records`.
///
/// A missing reading adds nothing to its day's total, so a day on which no
/// station reported precipitation still appears, with a total of `0.0`.
pub fn daily_precipitation_totals(records: &[Measurement], count: usize) -> DailySeries {
    let totals = latest_groups(group_by_date(records), count)
        .map(|(date, group)| {
            let total = group
                .iter()
                .map(|record| record.precipitation.unwrap_or(0.0))
                .fold(0.0, |sum, value| sum + value);
            (date.to_string(), total)
        })
        .collect();
    DailySeries(totals)
}

/// Mean temperature per date over the `count` latest dates in `records`.
///
/// Only reported temperatures count toward a day's mean. A day among the
/// latest `count` with no reported temperature at all is left out.
pub fn daily_mean_temperature(records: &[Measurement], count: usize) -> DailySeries {
    let means = latest_groups(group_by_date(records), count)
        .filter_map(|(date, group)| {
            TemperatureStats::from_temperatures(group.iter().filter_map(|r| r.temperature))
                .average
                .map(|mean| (date.to_string(), mean))
        })
        .collect();
    DailySeries(means)
}

/// Temperature statistics across every record dated inside `range`.
///
/// Records are pooled, not grouped per day: a date reported by three stations
/// weighs three times in the average.
pub fn temperature_stats<'a, I>(records: I, range: &DateRange) -> TemperatureStats
where
    I: IntoIterator<Item = &'a Measurement>,
{
    TemperatureStats::from_temperatures(
        records
            .into_iter()
            .filter(|record| range.contains(&record.date))
            .filter_map(|record| record.temperature),
    )
}
