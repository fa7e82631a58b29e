use crate::io::output::{OutputWriter, ReportContext};
use crate::scoring::{PreferenceReport, TraitAttribution, TraitScore};
use serde::Serialize;
use std::io::Write;

/// Stable machine-readable envelope around a report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a ReportContext,
    informational: bool,
    results: Vec<TraitScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attributions: Option<&'a [TraitAttribution]>,
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(
        &mut self,
        report: &PreferenceReport,
        context: &ReportContext,
    ) -> anyhow::Result<()> {
        let attributions = match report {
            PreferenceReport::Ranked { attributions, .. } if context.explain => {
                Some(attributions.as_slice())
            }
            _ => None,
        };
        let envelope = JsonReport {
            summary: context,
            informational: report.is_informational(),
            results: report.entries(),
            attributions,
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
