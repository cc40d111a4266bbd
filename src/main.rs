use clap::Parser;
use tracing::{debug, error};

use cooee::{
    cli::commands::{
        catalog::CatalogCommand, demo::DemoCommand, signup::SignupCommand, CommandHandler,
    },
    cli::logging::{initialize_tracing, LogTarget},
    cli::{Cli, Commands},
    config::ConfigLoader,
    Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .with_explicit_path(cli.config.clone())
        .load()?;

    let level = cli
        .log_level
        .map(|l| l.to_filter_directive().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let target = LogTarget::for_command(cli.command.logs_to_file(), &config.logging);
    initialize_tracing(&level, &target)?;

    debug!(command = cli.command.name(), "Dispatching command");

    let handler: Box<dyn CommandHandler> = match cli.command {
        Commands::Signup => Box::new(SignupCommand::new(config)),
        Commands::Demo {
            answers,
            instant,
            format,
        } => Box::new(DemoCommand::new(
            config.providers,
            answers.into_script(),
            format,
            instant,
        )),
        Commands::Catalog { query, format } => {
            Box::new(CatalogCommand::new(config.providers, query, format))
        }
    };

    if let Err(e) = handler.execute().await {
        error!(command = handler.name(), error = %e, "Command failed");
        return Err(e);
    }
    Ok(())
}
