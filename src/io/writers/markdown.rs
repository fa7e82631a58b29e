use crate::io::output::{format_score, OutputWriter, ReportContext};
use crate::scoring::{PreferenceReport, TraitAttribution, TraitScore};
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
    fn write_report(
        &mut self,
        report: &PreferenceReport,
        context: &ReportContext,
    ) -> anyhow::Result<()> {
        self.write_header(context)?;
        match report {
            PreferenceReport::NoRatings => {
                writeln!(self.writer, "_No characters have been rated yet._")?;
            }
            PreferenceReport::Diagnostic { .. } => self.write_notice(&report.entries())?,
            PreferenceReport::Ranked {
                scores,
                attributions,
            } => {
                self.write_ranking(scores)?;
                if context.explain {
                    self.write_breakdown(attributions)?;
                }
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, context: &ReportContext) -> anyhow::Result<()> {
        writeln!(self.writer, "# Trait Preferences")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Rated | {} |", context.rated)?;
        writeln!(self.writer, "| Skipped | {} |", context.skipped)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_notice(&mut self, entries: &[TraitScore]) -> anyhow::Result<()> {
        let mut lines = entries.iter().map(|entry| entry.label.as_str());
        if let Some(title) = lines.next() {
            writeln!(self.writer, "## {title}")?;
            writeln!(self.writer)?;
        }
        for line in lines {
            writeln!(self.writer, "> {line}")?;
        }
        Ok(())
    }

    fn write_ranking(&mut self, scores: &[TraitScore]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Ranking")?;
        writeln!(self.writer)?;
        if scores.is_empty() {
            writeln!(self.writer, "_No trait could be scored._")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "| Rank | Trait | Score |")?;
        writeln!(self.writer, "|------|-------|-------|")?;
        for (i, entry) in scores.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                i + 1,
                escape_cell(&entry.label),
                format_score(entry.score)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_breakdown(&mut self, attributions: &[TraitAttribution]) -> anyhow::Result<()> {
        writeln!(self.writer, "## Breakdown")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Trait | With (n) | Without (m) | Delta | Confidence | Score |"
        )?;
        writeln!(
            self.writer,
            "|-------|----------|-------------|-------|------------|-------|"
        )?;
        for a in attributions {
            writeln!(
                self.writer,
                "| {} | {:.2} ({}) | {:.2} ({}) | {:.3} | {:.3} | {} |",
                escape_cell(a.trait_id.as_str()),
                a.test_avg,
                a.test_count,
                a.control_avg,
                a.control_count,
                a.delta,
                a.count_factor,
                format_score(a.score)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
