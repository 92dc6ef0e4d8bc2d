//! whops library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (API client, local session store, calculators).

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let cmd = &cli.command;
    match cmd {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(cmd, cfg),
        Commands::Log { .. } => cli::commands::log::handle(cmd, cfg),
        Commands::Login { .. }
        | Commands::Logout { .. }
        | Commands::Whoami
        | Commands::RequestAccess { .. } => cli::commands::auth::handle(cmd, cfg),
        Commands::Add { .. } => cli::commands::add::handle(cmd, cfg),
        Commands::SpotCheckTemplate { .. } => cli::commands::template::handle(cmd, cfg),
        Commands::List { .. } => cli::commands::list::handle(cmd, cfg),
        Commands::Edit { .. } => cli::commands::edit::handle(cmd, cfg),
        Commands::Dashboard => cli::commands::dashboard::handle(cmd, cfg),
        Commands::Calc { .. } => cli::commands::calc::handle(cmd, cfg),
        Commands::Admin { .. } => cli::commands::admin::handle(cmd, cfg),
        Commands::Shell { .. } => cli::commands::shell::handle(cmd, cfg),
    }
}

/// Configuration with command-line overrides (`--db`) applied.
pub fn with_overrides(cli: &Cli, cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    cfg
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let cfg = with_overrides(&cli, &Config::load()?);
    dispatch(&cli, &cfg)
}
