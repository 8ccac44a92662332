use crate::core::Category;
use crate::explain::format_value;
use crate::io::output::OutputWriter;
use crate::pipeline::{CompositeReport, Evaluation, MetricStatus};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_evaluation(&mut self, evaluation: &Evaluation) -> anyhow::Result<()> {
        writeln!(self.writer, "# Urban Farm KPI Report")?;
        writeln!(self.writer)?;
        self.write_composites(&evaluation.composites)?;
        self.write_metrics(&evaluation.metrics)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_composites(&mut self, composites: &[CompositeReport]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Composite Indices")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Index | Value | Status | History |")?;
        writeln!(self.writer, "|-------|-------|--------|---------|")?;
        for report in composites {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                report.name,
                format_value(Some(report.value), 2),
                report.status,
                history_span(report)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_metrics(&mut self, metrics: &[MetricStatus]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Metrics")?;
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
            writeln!(self.writer, "### {}", category.label())?;
            writeln!(self.writer)?;
            writeln!(self.writer, "| Metric | Value | Unit | Status | Score |")?;
            writeln!(self.writer, "|--------|-------|------|--------|-------|")?;
            for metric in rows {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {} | {} |",
                    metric.name,
                    format_value(metric.current_value, 2),
                    metric.unit,
                    metric.tier.map_or("N/A", |t| t.label()),
                    format_value(metric.score, 2)
                )?;
            }
        }
        Ok(())
    }
}

/// "N points, first..last" or "-" for an empty series
pub(crate) fn history_span(report: &CompositeReport) -> String {
    match (report.history.first(), report.history.last()) {
        (Some(first), Some(last)) => format!(
            "{} points, {}..{}",
            report.history.len(),
            first.date,
            last.date
        ),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_metric_set;
    use crate::config::{EngineConfig, FarmKpiConfig};
    use crate::pipeline::evaluate;

    #[test]
    fn test_markdown_report_lists_indices_and_metrics() {
        let engine = EngineConfig::from_config(&FarmKpiConfig::default()).unwrap();
        let evaluation = evaluate(&seed_metric_set().unwrap(), &engine);

        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_evaluation(&evaluation)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("| Global Performance Index (IGD) | 0.77 | Good | - |"));
        assert!(text.contains("### Technological & operational"));
        assert!(text.contains("| Water use efficiency | 2.80 | l/kg | Acceptable | 0.75 |"));
    }
}
