use std::collections::{BTreeMap, HashMap};
use std::fmt;
use chrono::{Datelike, NaiveDate};
use crate::expense::Expense;

/// A calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct MonthKey {
    pub(crate) year: i32,
    pub(crate) month: u32,
}

impl MonthKey {
    pub(crate) fn of(date: NaiveDate) -> MonthKey {
        MonthKey { year: date.year(), month: date.month() }
    }

    /// Continuous month number, equally spaced regardless of month length
    pub(crate) fn index(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64
    }

    pub(crate) fn next(&self) -> MonthKey {
        if self.month == 12 {
            MonthKey { year: self.year + 1, month: 1 }
        } else {
            MonthKey { year: self.year, month: self.month + 1 }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first_day) => write!(f, "{}", first_day.format("%b-%Y")),
            None => write!(f, "{:02}-{}", self.month, self.year),
        }
    }
}

/// Spend per category, plus the sum over all categories
#[derive(Debug, Default)]
pub(crate) struct CategoryTotals {
    pub(crate) totals: HashMap<String, f64>,
    pub(crate) grand_total: f64,
}

impl CategoryTotals {
    pub(crate) fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Totals ordered by category name, for display
    pub(crate) fn sorted(&self) -> Vec<(&str, f64)> {
        let mut sorted: Vec<(&str, f64)> = self.totals.iter().map(|(c, a)| (c.as_str(), *a)).collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}

/// Sum amounts per category. Expenses without a numeric amount are left out.
pub(crate) fn totals_by_category(expenses: &[Expense]) -> CategoryTotals {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for e in expenses {
        if let Some(amount) = e.valid_amount() {
            *totals.entry(e.category.clone()).or_insert(0.0) += amount;
        }
    }

    let grand_total = totals.values().sum();
    CategoryTotals { totals, grand_total }
}

/// Sum amounts per calendar month, oldest month first. Expenses with an unparseable date or
/// missing amount are dropped.
pub(crate) fn totals_by_month(expenses: &[Expense]) -> Vec<(MonthKey, f64)> {
    let mut buckets: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for e in expenses {
        if let (Some(date), Some(amount)) = (e.parsed_date(), e.valid_amount()) {
            *buckets.entry(MonthKey::of(date)).or_insert(0.0) += amount;
        }
    }

    buckets.into_iter().collect()
}

/// Individual amounts ordered by date, for plotting spend over time.
pub(crate) fn amounts_over_time(expenses: &[Expense]) -> Vec<(NaiveDate, f64)> {
    let mut points: Vec<(NaiveDate, f64)> = expenses.iter()
        .filter_map(|e| Some((e.parsed_date()?, e.valid_amount()?)))
        .collect();
    // Stable, so same-day expenses keep file order
    points.sort_by_key(|(date, _)| *date);
    points
}
