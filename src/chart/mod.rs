use std::io::{self, Write};

use chrono::NaiveDate;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::display::format_amount;

/// Width in characters of the longest bar
const BAR_WIDTH: usize = 40;

/// Rows in the amount-over-time chart
const LINE_HEIGHT: usize = 10;

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::DarkCyan,
    Color::DarkYellow,
];

/// One labelled bar, already scaled to the chart width
#[derive(Debug, PartialEq)]
pub(crate) struct Bar {
    pub(crate) label: String,
    pub(crate) value: f64,
    /// Share of the whole, only set for pie slices
    pub(crate) share: Option<f64>,
    pub(crate) width: usize,
}

/// Share of each positive total. Non-positive totals can't be drawn as a slice and are left out.
pub(crate) fn pie_slices(totals: &[(String, f64)]) -> Vec<Bar> {
    let sum: f64 = totals.iter().map(|(_, v)| *v).filter(|v| *v > 0.0).sum();
    if sum <= 0.0 {
        return vec![];
    }

    totals.iter()
        .filter(|(_, v)| *v > 0.0)
        .map(|(label, v)| {
            let share = v / sum;
            Bar {
                label: label.clone(),
                value: *v,
                share: Some(share),
                width: (share * BAR_WIDTH as f64).round() as usize,
            }
        })
        .collect()
}

/// Bars scaled so the largest absolute value spans the full width
pub(crate) fn bars(series: &[(String, f64)]) -> Vec<Bar> {
    let max = series.iter().map(|(_, v)| v.abs()).fold(0.0, f64::max);
    series.iter()
        .map(|(label, v)| Bar {
            label: label.clone(),
            value: *v,
            share: None,
            width: if max > 0.0 { (v.abs() / max * BAR_WIDTH as f64).round() as usize } else { 0 },
        })
        .collect()
}

/// Plot values left to right on a character grid, top row first. Each value takes one column.
pub(crate) fn line_grid(values: &[f64], height: usize) -> Vec<String> {
    if values.is_empty() || height == 0 {
        return vec![];
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let row_of = |v: f64| -> usize {
        if span > 0.0 {
            ((v - min) / span * (height - 1) as f64).round() as usize
        } else {
            0
        }
    };

    let mut grid = vec![vec![' '; values.len()]; height];
    let mut previous: Option<usize> = None;
    for (x, v) in values.iter().enumerate() {
        let row = row_of(*v);
        // Vertical stroke joining the previous point
        if let Some(prev) = previous {
            let (low, high) = if prev < row { (prev, row) } else { (row, prev) };
            for r in low + 1..high {
                grid[height - 1 - r][x] = '│';
            }
        }
        grid[height - 1 - row][x] = '●';
        previous = Some(row);
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Share of spend per category, drawn as proportional bars with percentages
pub(crate) fn draw_pie<W: Write>(out: &mut W, title: &str, totals: &[(String, f64)]) -> io::Result<()> {
    let slices = pie_slices(totals);
    draw_bars(out, title, &slices)
}

pub(crate) fn draw_bar<W: Write>(out: &mut W, title: &str, series: &[(String, f64)]) -> io::Result<()> {
    draw_bars(out, title, &bars(series))
}

fn draw_bars<W: Write>(out: &mut W, title: &str, bars: &[Bar]) -> io::Result<()> {
    queue!(out, Print(format!("\n{title}\n\n")))?;
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);

    for (i, bar) in bars.iter().enumerate() {
        let color = if bar.value < 0.0 { Color::Red } else { PALETTE[i % PALETTE.len()] };
        let suffix = match bar.share {
            Some(share) => format!(" {:5.1}%", share * 100.0),
            None => format!(" {}", format_amount(bar.value)),
        };
        queue!(
            out,
            Print(format!("{:>width$} ", bar.label, width = label_width)),
            SetForegroundColor(color),
            Print("█".repeat(bar.width)),
            ResetColor,
            Print(format!("{suffix}\n"))
        )?;
    }

    out.flush()
}

/// Amount of each expense over time
pub(crate) fn draw_line<W: Write>(out: &mut W, title: &str, points: &[(NaiveDate, f64)]) -> io::Result<()> {
    queue!(out, Print(format!("\n{title}\n\n")))?;
    let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
    let grid = line_grid(&values, LINE_HEIGHT);

    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_label = format_amount(max);
    let min_label = format_amount(min);
    let axis_width = max_label.len().max(min_label.len());

    for (i, row) in grid.iter().enumerate() {
        let axis = if i == 0 {
            max_label.as_str()
        } else if i == grid.len() - 1 {
            min_label.as_str()
        } else {
            ""
        };
        queue!(
            out,
            Print(format!("{:>width$} ┤", axis, width = axis_width)),
            SetForegroundColor(Color::Cyan),
            Print(row),
            ResetColor,
            Print("\n")
        )?;
    }

    if let (Some((first, _)), Some((last, _))) = (points.first(), points.last()) {
        queue!(out, Print(format!("{:>width$}  {} .. {}\n", "", first, last, width = axis_width)))?;
    }

    out.flush()
}
