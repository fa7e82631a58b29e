use crate::io::output::{format_score, OutputWriter, ReportContext};
use crate::scoring::{PreferenceReport, TraitAttribution, TraitScore};
use colored::*;
use std::io::Write;

/// Scores above this magnitude are highlighted.
const STRONG_SCORE: f64 = 0.5;
const RULE: &str = "───────────────────────────────────────────";

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(
        &mut self,
        report: &PreferenceReport,
        context: &ReportContext,
    ) -> anyhow::Result<()> {
        self.write_header(context)?;
        match report {
            PreferenceReport::NoRatings => {
                writeln!(
                    self.writer,
                    "{}",
                    "No characters rated yet. Rate a few and try again.".yellow()
                )?;
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

impl<W: Write> TerminalWriter<W> {
    fn write_header(&mut self, context: &ReportContext) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "TRAIT PREFERENCES".bold().cyan())?;
        writeln!(self.writer, "{RULE}")?;
        writeln!(
            self.writer,
            "Rated: {}  Skipped: {}",
            context.rated.to_string().bold(),
            context.skipped
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_notice(&mut self, entries: &[TraitScore]) -> anyhow::Result<()> {
        let mut lines = entries.iter().map(|entry| entry.label.as_str());
        if let Some(title) = lines.next() {
            writeln!(self.writer, "{}", title.bold().yellow())?;
        }
        for line in lines {
            writeln!(self.writer, "  {line}")?;
        }
        Ok(())
    }

    fn write_ranking(&mut self, scores: &[TraitScore]) -> anyhow::Result<()> {
        if scores.is_empty() {
            writeln!(self.writer, "{}", "No trait could be scored.".dimmed())?;
            return Ok(());
        }

        let width = scores
            .iter()
            .map(|entry| entry.label.chars().count())
            .max()
            .unwrap_or(0);
        for (i, entry) in scores.iter().enumerate() {
            writeln!(
                self.writer,
                "{:>3}. {:<width$}  {}",
                i + 1,
                entry.label,
                paint_score(entry.score)
            )?;
        }
        Ok(())
    }

    fn write_breakdown(&mut self, attributions: &[TraitAttribution]) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Breakdown".bold())?;
        writeln!(self.writer, "{RULE}")?;
        for a in attributions {
            writeln!(
                self.writer,
                "{}: with {:.2} (n={}) vs without {:.2} (m={}), delta {:.3} x confidence {:.3} = {}",
                a.trait_id.as_str().bold(),
                a.test_avg,
                a.test_count,
                a.control_avg,
                a.control_count,
                a.delta,
                a.count_factor,
                paint_score(a.score)
            )?;
        }
        Ok(())
    }
}

fn paint_score(score: f64) -> ColoredString {
    let text = format_score(score);
    let painted = if score > 0.0 {
        text.green()
    } else if score < 0.0 {
        text.red()
    } else {
        text.normal()
    };
    if score.abs() > STRONG_SCORE {
        painted.bold()
    } else {
        painted
    }
}
