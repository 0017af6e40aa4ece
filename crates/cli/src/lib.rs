pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use lyra_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "lyra",
    about = "Lyra merchant CLI",
    long_about = "Search the product catalog, place orders against it, and run store maintenance checks.",
    after_help = "Examples:\n  lyra seed\n  lyra search mug\n  lyra order '[{\"product_id\": \"p1\", \"quantity\": 2}]'\n  lyra last-order\n  lyra doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a lyra.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the catalog JSON file path")]
    catalog_path: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the orders JSON file path")]
    orders_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Search the catalog; no query lists every product")]
    Search {
        query: Option<String>,
    },
    #[command(about = "Place an order from a JSON array of items")]
    Order {
        items: String,
    },
    #[command(name = "last-order", about = "Show the most recently placed order")]
    LastOrder,
    #[command(about = "Inspect effective configuration values")]
    Config,
    #[command(about = "Validate config, catalog readability, and ledger readability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Write a demo catalog and an empty ledger if the files are absent")]
    Seed,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = LoadOptions {
        config_path: cli.config,
        overrides: ConfigOverrides {
            catalog_path: cli.catalog_path,
            orders_path: cli.orders_path,
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    };

    init_logging(&options);

    let result = match cli.command {
        Command::Search { query } => commands::search::run(options, query.as_deref()),
        Command::Order { items } => commands::order::run(options, &items),
        Command::LastOrder => commands::last_order::run(options),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(options) }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(options, json) }
        }
        Command::Seed => commands::seed::run(options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(options: &LoadOptions) {
    use tracing::Level;

    // Doctor reports config problems in detail; logging falls back to
    // defaults when the config cannot load.
    let config = AppConfig::load(options.clone()).unwrap_or_default();
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    let builder = tracing_subscriber::fmt().with_target(false).with_max_level(log_level);
    let result = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    let _ = result;
}
