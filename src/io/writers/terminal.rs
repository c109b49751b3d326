use crate::io::writers::ViewModelWriter;
use crate::view_model::ViewModel;
use colored::*;
use std::io::Write;

const RULE: &str = "═══════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────";

/// Human-readable summary of a view model.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self, vm: &ViewModel) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", RULE.cyan())?;
        writeln!(self.writer, "  {}", vm.title.bold().cyan())?;
        writeln!(self.writer, "{}", RULE.cyan())?;
        writeln!(
            self.writer,
            "Report {} (updated {})",
            vm.report_date, vm.last_updated
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_metrics(&mut self, vm: &ViewModel) -> anyhow::Result<()> {
        writeln!(self.writer, "📈 {}", "Key Metrics".bold())?;
        writeln!(self.writer, "{THIN_RULE}")?;
        for metric in &vm.key_metrics {
            writeln!(self.writer, "  {:<16} {}", metric.title, metric.value.bold())?;
        }
        writeln!(self.writer)?;
        for metric in &vm.highlight_metrics {
            writeln!(self.writer, "  {:<28} {}", metric.title, metric.value.green())?;
        }
        if vm.skipped_records > 0 {
            writeln!(
                self.writer,
                "  {}",
                format!("{} input rows skipped", vm.skipped_records).yellow()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_sources(&mut self, vm: &ViewModel) -> anyhow::Result<()> {
        writeln!(self.writer, "📚 {}", "Sources".bold())?;
        writeln!(self.writer, "{THIN_RULE}")?;
        for source in &vm.sources {
            writeln!(
                self.writer,
                "  {:<14} {:>5} total  {:>5} read  {:>5} unread  {:>7}",
                source.name,
                source.count,
                source.read.to_string().green(),
                source.unread.to_string().yellow(),
                source.read_pct_display
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_backlog(&mut self, vm: &ViewModel) -> anyhow::Result<()> {
        writeln!(self.writer, "⏳ {}", "Unread Backlog".bold())?;
        writeln!(self.writer, "{THIN_RULE}")?;
        for bucket in &vm.unread_age_distribution {
            let count = if bucket.count == 0 {
                bucket.count.to_string().dimmed()
            } else {
                bucket.count.to_string().yellow()
            };
            writeln!(self.writer, "  {:<20} {}", bucket.label, count)?;
        }
        if !vm.top_oldest_unread_articles.is_empty() {
            writeln!(self.writer)?;
            writeln!(self.writer, "  Oldest unread:")?;
            for article in &vm.top_oldest_unread_articles {
                writeln!(
                    self.writer,
                    "  {} {} ({})",
                    article.date.dimmed(),
                    article.title,
                    article.category
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> ViewModelWriter for TerminalWriter<W> {
    fn write_view_model(&mut self, view_model: &ViewModel) -> anyhow::Result<()> {
        self.write_header(view_model)?;
        self.write_metrics(view_model)?;
        self.write_sources(view_model)?;
        self.write_backlog(view_model)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::Aggregator;
    use crate::config::{AveragingConfig, DisplayConfig, SourceRegistry};
    use crate::core::RawRow;
    use crate::io::writers::JsonWriter;
    use crate::view_model::ViewModelAssembler;
    use chrono::{TimeZone, Utc};

    fn view_model() -> ViewModel {
        let registry = SourceRegistry::default();
        let reference = Utc.with_ymd_and_hms(2025, 11, 20, 0, 0, 0).unwrap();
        let mut aggregator = Aggregator::new(&registry, reference, 3);
        aggregator.ingest_all(vec![
            RawRow::new("2025-11-01", "Read me", "l1", "GitHub", true),
            RawRow::new("2024-01-02", "Old one", "l2", "Stripe", false),
        ]);
        let snapshot = aggregator.finish(&AveragingConfig::default());
        let display = DisplayConfig::default();
        ViewModelAssembler::new(&display, &registry).assemble(&snapshot, &[], Vec::new())
    }

    #[test]
    fn terminal_summary_lists_metrics_sources_and_backlog() {
        colored::control::set_override(false);
        let mut writer = TerminalWriter::new(Vec::new());
        writer.write_view_model(&view_model()).unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();

        assert!(output.contains("Total Articles"));
        assert!(output.contains("50.0%"));
        assert!(output.contains("Stripe"));
        assert!(output.contains("Older than 1 year"));
        assert!(output.contains("2024-01-02 Old one (Stripe)"));
    }

    #[test]
    fn json_output_is_parseable() {
        let mut writer = JsonWriter::new(Vec::new());
        writer.write_view_model(&view_model()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        assert_eq!(value["total_articles"], 2);
        assert_eq!(value["read_rate_display"], "50.0%");
        assert_eq!(value["charts"]["month_aggregate"]["labels"][0], "Jan");
    }
}
