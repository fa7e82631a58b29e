use super::AppContext;
use crate::io::{create_writer, Dataset, OutputFormat, ReportContext};
use crate::scoring::{PreferenceEngine, PreferenceReport};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CalculateConfig {
    pub dataset: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub explain: bool,
}

pub fn calculate(app: &AppContext, config: CalculateConfig) -> Result<PreferenceReport> {
    let dataset = Dataset::load(&config.dataset)
        .with_context(|| format!("Failed to load dataset {}", config.dataset.display()))?;
    let session = app.open_session()?;

    let engine = PreferenceEngine::new(app.config.attribution.clone());
    let report = engine.calculate(session.store(), &dataset.catalog);

    let format = config.format.unwrap_or(app.config.output.default_format);
    let sink: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    let context = ReportContext::from_store(session.store(), config.explain);
    let mut writer = create_writer(format, sink);
    writer.write_report(&report, &context)?;

    Ok(report)
}
