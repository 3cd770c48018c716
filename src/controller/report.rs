use std::io::Write;
use log::warn;
use crate::aggregate::{amounts_over_time, totals_by_category, totals_by_month};
use crate::chart;
use crate::controller::Context;
use crate::display::{self, format_amount};
use crate::expense::Expense;
use crate::forecast;

/// Load every expense. A file that can't be read is reported and treated as empty.
fn load_expenses<W: Write>(ctx: &Context, out: &mut W) -> std::io::Result<Vec<Expense>> {
    match ctx.store.load_all() {
        Ok(expenses) => Ok(expenses),
        Err(e) => {
            warn!("Failed to load {}: {}", ctx.store.path().display(), e);
            writeln!(out, "Unable to read expenses: {e}")?;
            Ok(vec![])
        }
    }
}

pub(crate) fn view_expenses<W: Write>(ctx: &Context, out: &mut W) -> std::io::Result<()> {
    let expenses = load_expenses(ctx, out)?;
    if expenses.is_empty() {
        return writeln!(out, "No expenses found.");
    }

    writeln!(out, "\n--- All Expenses ---")?;
    writeln!(out, "{}", display::expenses_table(&expenses))
}

pub(crate) fn show_summary<W: Write>(ctx: &Context, out: &mut W) -> std::io::Result<()> {
    let totals = totals_by_category(&load_expenses(ctx, out)?);
    if totals.is_empty() {
        return writeln!(out, "No expenses to summarise.");
    }

    writeln!(out, "\n--- Expense Summary ---")?;
    writeln!(out, "{}", display::category_table(&totals, ctx.currency))
}

pub(crate) fn show_monthly_trend<W: Write>(ctx: &Context, out: &mut W) -> std::io::Result<()> {
    let months = totals_by_month(&load_expenses(ctx, out)?);
    if months.is_empty() {
        return writeln!(out, "No dated expenses to show.");
    }

    writeln!(out, "\n--- Monthly Trend ---")?;
    writeln!(out, "{}", display::monthly_table(&months, ctx.currency))?;
    let series: Vec<(String, f64)> = months.iter().map(|(m, a)| (m.to_string(), *a)).collect();
    chart::draw_bar(out, "Total Expenses by Month", &series)
}

pub(crate) fn plot_category_chart<W: Write>(ctx: &Context, out: &mut W) -> std::io::Result<()> {
    let totals = totals_by_category(&load_expenses(ctx, out)?);
    let series: Vec<(String, f64)> = totals.sorted().into_iter().map(|(c, a)| (c.to_string(), a)).collect();
    if chart::pie_slices(&series).is_empty() {
        return writeln!(out, "No expenses to visualise.");
    }

    chart::draw_pie(out, "Expenses by Category", &series)
}

pub(crate) fn plot_expenses_over_time<W: Write>(ctx: &Context, out: &mut W) -> std::io::Result<()> {
    let points = amounts_over_time(&load_expenses(ctx, out)?);
    if points.is_empty() {
        return writeln!(out, "No expenses to visualise.");
    }

    chart::draw_line(out, &format!("Expenses Over Time ({})", ctx.currency), &points)
}

pub(crate) fn predict_next_month<W: Write>(ctx: &Context, out: &mut W) -> std::io::Result<()> {
    let months = totals_by_month(&load_expenses(ctx, out)?);
    match forecast::predict_next_month(&months) {
        Ok(forecast) => writeln!(
            out,
            "Predicted spend for {}: {}{}",
            forecast.month, ctx.currency, format_amount(forecast.amount)
        ),
        Err(e) => writeln!(out, "Unable to predict: {e}"),
    }
}

pub(crate) fn diagnose<W: Write>(ctx: &Context, out: &mut W) -> std::io::Result<()> {
    let malformed = match ctx.store.diagnose() {
        Ok(malformed) => malformed,
        Err(e) => {
            warn!("Failed to scan {}: {}", ctx.store.path().display(), e);
            return writeln!(out, "Unable to read expenses: {e}");
        }
    };

    if malformed.is_empty() {
        return writeln!(out, "No malformed rows found in {}.", ctx.store.path().display());
    }

    writeln!(out, "\n--- {} Malformed Rows (expected 3 commas each) ---", malformed.len())?;
    writeln!(out, "{}", display::malformed_table(&malformed))?;
    writeln!(out, "These rows are skipped when loading. Quote or remove extra commas to include them.")
}
