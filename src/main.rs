use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use favreel::cli::{Cli, Commands};
use favreel::commands::{cmd_add, cmd_completions, cmd_config, cmd_import, cmd_list, cmd_remove};
use favreel::config::FavreelConfig;
use favreel::db::Database;
use favreel::logging::{self, LogTarget};
use favreel::tui;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => FavreelConfig::config_path()?,
    };
    let config = FavreelConfig::load_from(&config_path)?;
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so its logs go to a file
    let target = match command {
        Commands::Tui => LogTarget::File(config.log_directory()?),
        _ => LogTarget::Stderr,
    };
    let _guard = logging::init(&config.log, target)?;

    let database_path = match cli.database {
        Some(path) => path,
        None => config.database_path()?,
    };
    let open_db = || -> Result<Arc<Database>> {
        debug!(path = %database_path.display(), "opening database");
        Ok(Arc::new(Database::open(&database_path)?))
    };

    match command {
        Commands::Tui => tui::run(&config, open_db()?),
        Commands::List { page, all, json } => cmd_list(&config, open_db()?, page, all, json),
        Commands::Add { code, title, cover } => {
            cmd_add(&*open_db()?, &code, &title, cover.as_deref())
        }
        Commands::Import { file } => cmd_import(&*open_db()?, &file),
        Commands::Remove { code, yes } => cmd_remove(&config, open_db()?, &code, yes),
        Commands::Config { path } => cmd_config(&config, &config_path, path),
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
