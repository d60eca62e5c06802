use crate::dataset::Dataset;
use crate::error::{Error, Result};
use log::debug;

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Next-day price from a straight-line trend over the day offset
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// Ordinary least squares fit of `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    slope: f64,
    intercept: f64,
    r_squared: f64,
    n: usize,
}

impl LinearTrend {
    /// Fit over `(x, y)` points. Returns `None` for an empty slice.
    ///
    /// When every `x` is the same the slope is zero and the intercept is the mean of `y`,
    /// which is the minimum-norm least squares solution.
    pub fn fit(points: &[(f64, f64)]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });

        let slope = if sxx > f64::EPSILON { sxy / sxx } else { 0.0 };
        let intercept = mean_y - slope * mean_x;

        let ss_tot: f64 = points.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();
        let ss_res: f64 = points
            .iter()
            .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
            .sum();
        let r_squared = if ss_tot > f64::EPSILON {
            1.0 - ss_res / ss_tot
        } else {
            1.0
        };

        Some(Self {
            slope,
            intercept,
            r_squared,
            n: points.len(),
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    /// Number of points the trend was fitted on.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn predict_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

// -------------------------------------------------------------------------------------------------

/// Predict a commodity's average price one day after its last recorded date, to 2 decimal places.
///
/// The regression feature is the whole-day offset from the commodity's earliest date.
pub fn predict_next_day(dataset: &Dataset, commodity: &str) -> Result<f64> {
    let rows: Vec<_> = dataset.filter(commodity).collect();
    let first = rows.iter().map(|r| r.date).min();
    let last = rows.iter().map(|r| r.date).max();
    let Some((first, last)) = first.zip(last) else {
        return Err(Error::CommodityNotFound(commodity.to_string()));
    };

    let points: Vec<(f64, f64)> = rows
        .iter()
        .map(|r| ((r.date - first).num_days() as f64, r.average))
        .collect();
    let trend =
        LinearTrend::fit(&points).ok_or_else(|| Error::CommodityNotFound(commodity.to_string()))?;

    let next_day = (last - first).num_days() + 1;
    let predicted = round2(trend.predict_at(next_day as f64));
    debug!(
        "{commodity}: slope {:.4}, intercept {:.4}, r² {:.3} over {} rows; day {next_day} => {predicted}",
        trend.slope(),
        trend.intercept(),
        trend.r_squared(),
        trend.len(),
    );

    if !predicted.is_finite() {
        return Err(Error::Degenerate(commodity.to_string()));
    }
    Ok(predicted)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
