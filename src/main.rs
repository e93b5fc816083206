use clap::Parser;
use numerology_engine::utils::error::ErrorSeverity;
use numerology_engine::utils::{logger, validation::Validate};
use numerology_engine::{
    render_report, CliConfig, ConfigProvider, MeaningsTable, NumerologyEngine, NumerologyError,
    OutputFormat, ReportContext, Settings, TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Profile computation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn run(config: &CliConfig) -> Result<(), NumerologyError> {
    config.validate()?;

    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            Some(TomlConfig::from_file(path)?)
        }
        None => None,
    };
    let settings = Settings::resolve(config, file_config.as_ref())?;

    let meanings = match settings.meanings_path() {
        Some(path) => MeaningsTable::from_file(path)?,
        None => {
            tracing::warn!("No meanings file configured, interpretations will be omitted");
            MeaningsTable::default()
        }
    };

    let engine = NumerologyEngine::new(settings.engine_options()?);
    let profile = engine.profile(&config.birth_date()?, config.gender()?);

    match settings.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
        OutputFormat::Text => {
            let context = ReportContext {
                time: config.birth_time()?,
                place: config.place.clone(),
            };
            print!("{}", render_report(&profile, &meanings, &context));
        }
    }

    Ok(())
}
