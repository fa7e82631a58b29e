use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use crate::scoring::PreferenceReport;
use crate::session::RatingStore;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

/// Session facts printed alongside a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportContext {
    pub rated: usize,
    pub skipped: usize,
    /// Include the per-trait breakdown.
    #[serde(skip)]
    pub explain: bool,
}

impl ReportContext {
    pub fn from_store(store: &RatingStore, explain: bool) -> Self {
        Self {
            rated: store.rated_count(),
            skipped: store.skipped_count(),
            explain,
        }
    }
}

pub trait OutputWriter {
    fn write_report(
        &mut self,
        report: &PreferenceReport,
        context: &ReportContext,
    ) -> anyhow::Result<()>;
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

/// `+1.25` / `-0.40`, the signed form shared by the text writers.
pub(crate) fn format_score(score: f64) -> String {
    format!("{score:+.2}")
}
