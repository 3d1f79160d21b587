use clap::Parser;
use std::io;
use trip_planner::utils::error::ErrorSeverity;
use trip_planner::utils::{logger, validation::Validate};
use trip_planner::{
    CliConfig, ConfigProvider, MenuShell, OpenAiGenerator, PlannerError, TomlConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env must be loaded before clap reads OPENAI_API_KEY
    let dotenv = dotenvy::dotenv();
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting trip-planner");
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    let result = match &config.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(mut toml_config) => {
                    if toml_config.api_key().is_none() {
                        toml_config.assistant.api_key = config.api_key.clone();
                    }
                    run(&toml_config).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(&config).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "trip-planner failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

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

async fn run<C: ConfigProvider + Validate>(config: &C) -> Result<(), PlannerError> {
    config.validate()?;
    tracing::debug!(
        "data file: {}, itineraries: {}, endpoint: {}, model: {}",
        config.data_file(),
        config.itinerary_dir(),
        config.api_endpoint(),
        config.model()
    );
    if config.api_key().is_none() {
        tracing::warn!("No API key configured; itinerary generation is unavailable");
    }

    let generator = OpenAiGenerator::from_config(config)?;
    let stdin = io::stdin();
    let mut shell = MenuShell::from_config(config, generator, stdin.lock(), io::stdout());
    shell.run().await
}
