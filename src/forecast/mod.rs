use std::collections::BTreeSet;
use std::fmt;
use crate::aggregate::MonthKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Fewer than two distinct months to fit a line through
    NotEnoughData { months: usize },
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ForecastError::NotEnoughData { months } => write!(
                f,
                "need at least 2 months of expenses to predict, found {}. Add more data and try again",
                months
            ),
        }
    }
}

impl std::error::Error for ForecastError {}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Forecast {
    pub(crate) month: MonthKey,
    /// Not clamped, a falling trend may predict a negative amount
    pub(crate) amount: f64,
}

/// Fit an ordinary least squares line through (month index, total) and extrapolate one month
/// past the latest month.
pub(crate) fn predict_next_month(monthly_totals: &[(MonthKey, f64)]) -> Result<Forecast, ForecastError> {
    let distinct: BTreeSet<MonthKey> = monthly_totals.iter().map(|(m, _)| *m).collect();
    if distinct.len() < 2 {
        return Err(ForecastError::NotEnoughData { months: distinct.len() });
    }

    let n = monthly_totals.len() as f64;
    let xs: Vec<f64> = monthly_totals.iter().map(|(m, _)| m.index() as f64).collect();
    let ys: Vec<f64> = monthly_totals.iter().map(|(_, total)| *total).collect();
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        sxy += (x - x_mean) * (y - y_mean);
        sxx += (x - x_mean) * (x - x_mean);
    }
    let slope = sxy / sxx;

    // Two distinct months guarantee a last element
    let last = *distinct.iter().next_back().unwrap_or(&monthly_totals[0].0);
    let month = last.next();
    let amount = y_mean + slope * (month.index() as f64 - x_mean);

    Ok(Forecast { month, amount })
}
