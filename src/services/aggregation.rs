//! Visitor aggregation
//!
//! Turns a flat sequence of reservations into the dashboard series: visitors,
//! adults and children per day, plus visitors per country. Pure and
//! synchronous; an empty input yields empty series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::models::{
    reservation::ReservationRecord,
    series::{CategoryPoint, DatedPoint, VisitorSeries},
};

#[derive(Default)]
struct DayTotals {
    visitors: u64,
    adults: u64,
    children: u64,
}

/// Aggregate records into per-day and per-country series in a single pass.
pub fn aggregate<'a, I>(records: I) -> VisitorSeries
where
    I: IntoIterator<Item = &'a ReservationRecord>,
{
    let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
    let mut countries: IndexMap<&'a str, u64> = IndexMap::new();

    for record in records {
        let visitors = record.total_visitors();

        let day = days.entry(record.arrival_date).or_default();
        day.visitors += visitors;
        day.adults += u64::from(record.adults);
        day.children += u64::from(record.children);

        *countries.entry(record.country.as_str()).or_insert(0) += visitors;
    }

    let daily = day_series(&days, |t| t.visitors);
    let adults = day_series(&days, |t| t.adults);
    let children = day_series(&days, |t| t.children);

    let by_country = countries
        .into_iter()
        .map(|(country, value)| CategoryPoint {
            category: country.to_string(),
            value,
        })
        .collect();

    VisitorSeries {
        total: daily.clone(),
        daily,
        adults,
        children,
        by_country,
    }
}

fn day_series(
    days: &BTreeMap<NaiveDate, DayTotals>,
    value: impl Fn(&DayTotals) -> u64,
) -> Vec<DatedPoint> {
    days.iter()
        .map(|(date, totals)| DatedPoint {
            date: *date,
            value: value(totals),
        })
        .collect()
}
