//! Chart rendering seam.
//!
//! Drawing is delegated to a [`ChartRenderer`], which only ever sees labels
//! and numeric series. [`TextChartRenderer`] draws horizontal bars for the CLI.

use std::fmt::Write as _;

use crate::types::summary::ChartData;

/// A named numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series<'a> {
    pub label: &'a str,
    pub values: Vec<u64>,
}

/// External collaborator that draws charts from pre-aggregated numbers.
pub trait ChartRenderer {
    /// Stacked bar chart, one stack per label.
    fn bar(&mut self, title: &str, labels: &[&str], series: &[Series<'_>]);
    fn line(&mut self, title: &str, labels: &[&str], series: &Series<'_>);
    /// Pie chart; `slice_labels` already carry value and percentage.
    fn pie(&mut self, title: &str, slice_labels: &[String], values: &[u64]);
}

/// Feeds all three charts to `renderer`.
pub fn render_charts(renderer: &mut dyn ChartRenderer, data: &ChartData) {
    let completion = &data.completion;
    renderer.bar(
        "Completion by section",
        &completion.labels(),
        &[
            Series {
                label: "Completed",
                values: completion.completed_series(),
            },
            Series {
                label: "Pending",
                values: completion.pending_series(),
            },
        ],
    );

    renderer.line(
        "Items added over time",
        &data.timeline.labels(),
        &Series {
            label: "Items Added",
            values: data.timeline.counts(),
        },
    );

    let distribution = &data.distribution;
    let slice_labels: Vec<String> = distribution
        .slices
        .iter()
        .map(|slice| distribution.slice_label(slice))
        .collect();
    let values: Vec<u64> = distribution.slices.iter().map(|s| s.count).collect();
    renderer.pie("Distribution", &slice_labels, &values);
}

/// Renders charts as plain text bars.
pub struct TextChartRenderer {
    width: usize,
    out: String,
}

impl TextChartRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            out: String::new(),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn bar_len(&self, value: u64, max: u64) -> usize {
        if max == 0 {
            return 0;
        }
        ((value as f64 / max as f64) * self.width as f64).round() as usize
    }

    fn label_width(labels: &[&str]) -> usize {
        labels.iter().map(|l| l.chars().count()).max().unwrap_or(0)
    }
}

impl Default for TextChartRenderer {
    fn default() -> Self {
        Self::new(40)
    }
}

impl ChartRenderer for TextChartRenderer {
    fn bar(&mut self, title: &str, labels: &[&str], series: &[Series<'_>]) {
        let _ = writeln!(self.out, "{}", title);
        let totals: Vec<u64> = (0..labels.len())
            .map(|i| series.iter().filter_map(|s| s.values.get(i)).sum())
            .collect();
        let max = totals.iter().copied().max().unwrap_or(0);
        let pad = Self::label_width(labels);
        let marks = ['#', '.', '+', '*'];

        for (i, label) in labels.iter().enumerate() {
            let mut bar = String::new();
            let mut parts = Vec::new();
            for (n, s) in series.iter().enumerate() {
                let value = s.values.get(i).copied().unwrap_or(0);
                let len = self.bar_len(value, max);
                bar.extend(std::iter::repeat(marks[n % marks.len()]).take(len));
                parts.push(format!("{} {}", s.label.to_lowercase(), value));
            }
            let _ = writeln!(self.out, "  {:<pad$} |{} {}", label, bar, parts.join(", "));
        }
        let _ = writeln!(self.out);
    }

    fn line(&mut self, title: &str, labels: &[&str], series: &Series<'_>) {
        let _ = writeln!(self.out, "{}", title);
        if labels.is_empty() {
            let _ = writeln!(self.out, "  (no data)");
        }
        let max = series.values.iter().copied().max().unwrap_or(0);
        let pad = Self::label_width(labels);
        for (label, value) in labels.iter().zip(&series.values) {
            let bar = "*".repeat(self.bar_len(*value, max));
            let _ = writeln!(self.out, "  {:<pad$} |{} {}", label, bar, value);
        }
        let _ = writeln!(self.out);
    }

    fn pie(&mut self, title: &str, slice_labels: &[String], values: &[u64]) {
        let _ = writeln!(self.out, "{}", title);
        let total: u64 = values.iter().sum();
        for (label, value) in slice_labels.iter().zip(values) {
            let bar = "o".repeat(self.bar_len(*value, total));
            let _ = writeln!(self.out, "  {} {}", bar, label);
        }
        let _ = writeln!(self.out);
    }
}
