use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use carteira_cli::cli::{
    handle_report_command, handle_session_command, ReportCommands, SessionCommands,
};
use carteira_cli::config::{paths::CarteiraPaths, settings::Settings};
use carteira_cli::storage::open_session;

/// Environment variable holding the log filter
const LOG_ENV: &str = "CARTEIRA_LOG";

#[derive(Parser)]
#[command(
    name = "carteira",
    version,
    about = "Personal finance reports from saved backend payloads",
    long_about = "Carteira reads the JSON payloads of a personal-finance backend \
                  (expenses, entries, categories, budgets, goals) and renders \
                  statements, budget and goal progress, top categories and \
                  monthly summaries. Use '-' as a file name to read stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Session cache commands
    #[command(subcommand)]
    Session(SessionCommands),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CarteiraPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings);

    match cli.command {
        Some(Commands::Report(cmd)) => {
            handle_report_command(&settings, cmd)?;
        }
        Some(Commands::Session(cmd)) => {
            let mut ctx = open_session(&paths)?;
            handle_session_command(&mut ctx, cmd)?;
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Configuração criada em: {}", paths.settings_file().display());
        }
        Some(Commands::Config) => {
            println!("Carteira Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Session file:   {}", paths.session_file().display());
            println!();
            println!("Settings:");
            println!("  Locale:         {}", settings.locale);
            println!("  Currency:       {}", settings.currency);
            println!("  Top categories: {}", settings.top_categories);
            println!("  Log level:      {}", settings.log_level);
            println!("  Strict data:    {}", settings.strict_data);
        }
        None => {
            println!("Carteira - personal finance reports");
            println!();
            println!("Run 'carteira --help' for usage information.");
        }
    }

    Ok(())
}
