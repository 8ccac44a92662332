use crate::core::{Category, CompositeKind, StatusColor};
use crate::explain::format_value;
use crate::formatting::paint;
use crate::io::output::OutputWriter;
use crate::pipeline::{CompositeReport, Evaluation, MetricStatus};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::Write;

use super::markdown::history_span;

pub struct TerminalWriter<W: Write> {
    writer: W,
    use_color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, use_color: bool) -> Self {
        Self { writer, use_color }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if self.use_color {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn status_cell(&self, text: &str, color: Option<StatusColor>) -> Cell {
        let cell = Cell::new(text);
        match color {
            Some(color) if self.use_color => cell.fg(table_color(color)),
            _ => cell,
        }
    }
}

// Pure function: Map a status tag onto a table color
fn table_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => Color::Green,
        StatusColor::Yellow => Color::Yellow,
        StatusColor::Orange => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        StatusColor::Red => Color::Red,
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_evaluation(&mut self, evaluation: &Evaluation) -> anyhow::Result<()> {
        self.write_header(evaluation)?;
        self.write_composites(&evaluation.composites)?;
        self.write_metrics(&evaluation.metrics)?;
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self, evaluation: &Evaluation) -> anyhow::Result<()> {
        let title = "URBAN FARM KPI REPORT";
        let rule = "═════════════════════";
        writeln!(self.writer)?;
        if self.use_color {
            writeln!(self.writer, "{}", title.bold().cyan())?;
            writeln!(self.writer, "{}", rule.cyan())?;
        } else {
            writeln!(self.writer, "{}", title)?;
            writeln!(self.writer, "{}", rule)?;
        }

        if let Some(global) = evaluation.composite(CompositeKind::Global) {
            let value = format_value(Some(global.value), 2);
            let status = global.status.label();
            if self.use_color {
                writeln!(
                    self.writer,
                    "{}: {} ({})",
                    global.name,
                    value.as_str().bold(),
                    paint(status, global.color).bold()
                )?;
            } else {
                writeln!(self.writer, "{}: {} ({})", global.name, value, status)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_composites(&mut self, composites: &[CompositeReport]) -> anyhow::Result<()> {
        let mut table = self.table();
        table.set_header(vec!["Index", "Value", "Status", "History"]);
        for report in composites {
            table.add_row(vec![
                Cell::new(report.name),
                Cell::new(format_value(Some(report.value), 2)),
                self.status_cell(report.status.label(), Some(report.color)),
                Cell::new(history_span(report)),
            ]);
        }
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }

    fn write_metrics(&mut self, metrics: &[MetricStatus]) -> anyhow::Result<()> {
        for category in [
            Category::Environmental,
            Category::Social,
            Category::Technological,
        ] {
            let rows: Vec<&MetricStatus> =
                metrics.iter().filter(|m| m.category == category).collect();
            if rows.is_empty() {
                continue;
            }

            writeln!(self.writer)?;
            if self.use_color {
                writeln!(self.writer, "{}", category.label().bold())?;
            } else {
                writeln!(self.writer, "{}", category.label())?;
            }
            let mut table = self.table();
            table.set_header(vec!["Metric", "Value", "Unit", "Status", "Score"]);
            for metric in rows {
                table.add_row(vec![
                    Cell::new(&metric.name),
                    Cell::new(format_value(metric.current_value, 2)),
                    Cell::new(&metric.unit),
                    self.status_cell(metric.tier.map_or("N/A", |t| t.label()), metric.color),
                    Cell::new(format_value(metric.score, 2)),
                ]);
            }
            writeln!(self.writer, "{}", table)?;
        }
        Ok(())
    }
}
