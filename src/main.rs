use anyhow::Result;
use moerank::cli::Commands;
use moerank::commands::{self, AppContext, CalculateConfig, NextConfig};

fn main() -> Result<()> {
    let cli = moerank::cli::parse_args();
    init_logging(cli.verbosity);

    let config_path = cli.config;
    let session_path = cli.session;
    let app = || AppContext::resolve(config_path.as_deref(), session_path.clone());

    match cli.command {
        Commands::Calculate {
            dataset,
            format,
            output,
            explain,
        } => {
            commands::calculate(
                &app()?,
                CalculateConfig {
                    dataset,
                    format,
                    output,
                    explain,
                },
            )?;
            Ok(())
        }
        Commands::Rate { character, score } => commands::rate(&app()?, character, score),
        Commands::Skip { character } => commands::skip(&app()?, character),
        Commands::Revert => commands::revert(&app()?),
        Commands::Clear => commands::clear(&app()?),
        Commands::Next {
            dataset,
            subsets,
            image_only,
            genders,
        } => commands::suggest_next(
            &app()?,
            NextConfig {
                dataset,
                subsets,
                image_only,
                genders,
            },
        ),
        Commands::Status { dataset } => commands::status(&app()?, dataset.as_deref()),
        Commands::Init { force } => commands::init_config(force),
    }
}

/// `-v` maps to info, `-vv` to debug, `-vvv` to trace. `RUST_LOG` wins when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
