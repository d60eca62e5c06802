use crate::dataset::Dataset;
use chrono::{Datelike, NaiveDate};
use log::trace;
use std::collections::BTreeMap;

/// Mean average price over one calendar month, dated on the 1st of that month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyAverage {
    pub date: NaiveDate,
    pub average: f64,
}

/// Monthly mean prices for a commodity, oldest month first.
///
/// An unknown commodity has no rows to group, so the result is simply empty.
pub fn monthly_history(dataset: &Dataset, commodity: &str) -> Vec<MonthlyAverage> {
    // (year, month) => (sum, count)
    let mut months: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for record in dataset.filter(commodity) {
        let month = months
            .entry((record.date.year(), record.date.month()))
            .or_insert((0.0, 0));
        month.0 += record.average;
        month.1 += 1;
    }
    trace!("{commodity}: {} months of history", months.len());

    months
        .into_iter()
        .filter_map(|((year, month), (sum, count))| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|date| MonthlyAverage {
                date,
                average: sum / count as f64,
            })
        })
        .collect()
}
