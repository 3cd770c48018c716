use std::io::Write;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::{Editor, Helper};
use crate::classifier::Classifier;
use crate::store::ExpenseStore;

mod add;
mod report;

#[cfg(test)]
mod tests;

pub(crate) const MENU: &str = "
===== EXPENSE TRACKER MENU =====
1. Add Expense
2. View Expenses
3. Show Summary by Category
4. Show Monthly Trend
5. Plot Category Chart (Pie)
6. Plot Expenses Over Time
7. Predict Next Month's Spend
8. Diagnose Malformed Rows
9. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuChoice {
    Add,
    View,
    Summary,
    MonthlyTrend,
    CategoryChart,
    OverTimeChart,
    Predict,
    Diagnose,
    Exit,
}

impl MenuChoice {
    pub(crate) fn parse(input: &str) -> Option<MenuChoice> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::View),
            "3" => Some(MenuChoice::Summary),
            "4" => Some(MenuChoice::MonthlyTrend),
            "5" => Some(MenuChoice::CategoryChart),
            "6" => Some(MenuChoice::OverTimeChart),
            "7" => Some(MenuChoice::Predict),
            "8" => Some(MenuChoice::Diagnose),
            "9" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Where interactive answers come from
pub(crate) trait LineSource {
    /// Returns `None` once the user closes input (Ctrl-C / Ctrl-D)
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

impl<H: Helper, I: History> LineSource for Editor<H, I> {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Everything a menu action needs. The classifier is trained once at startup and only borrowed here.
pub(crate) struct Context<'a> {
    pub(crate) store: &'a ExpenseStore,
    pub(crate) classifier: &'a Classifier,
    pub(crate) currency: &'a str,
}

/// Run one menu action. Failures that concern the data are reported to `out`, only broken
/// input or output surfaces as an error.
pub(crate) fn run_choice<W: Write>(ctx: &Context, choice: MenuChoice, input: &mut dyn LineSource, out: &mut W) -> anyhow::Result<()> {
    match choice {
        MenuChoice::Add => {
            add::add_expense(ctx, input, out)?;
        }
        MenuChoice::View => report::view_expenses(ctx, out)?,
        MenuChoice::Summary => report::show_summary(ctx, out)?,
        MenuChoice::MonthlyTrend => report::show_monthly_trend(ctx, out)?,
        MenuChoice::CategoryChart => report::plot_category_chart(ctx, out)?,
        MenuChoice::OverTimeChart => report::plot_expenses_over_time(ctx, out)?,
        MenuChoice::Predict => report::predict_next_month(ctx, out)?,
        MenuChoice::Diagnose => report::diagnose(ctx, out)?,
        MenuChoice::Exit => {}
    }

    Ok(())
}
