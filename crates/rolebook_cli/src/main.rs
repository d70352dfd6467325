//! Rolebook operator console.
//!
//! # Responsibility
//! - Parse store and logging options.
//! - Run the main menu on stdin/stdout until the operator exits.

use clap::Parser;
use log::info;
use rolebook_core::{
    build_main_menu, default_log_level, init_logging, open_store, open_store_in_memory,
    AdminServices, StdConsole, UiError, UiHandler,
};
use std::error::Error;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rolebook")]
#[command(about = "Manage persons, roles, users and permissions", long_about = None)]
struct Cli {
    /// SQLite database file; created and migrated when missing
    #[arg(long, value_name = "PATH", default_value = "rolebook.sqlite3", conflicts_with = "memory")]
    db: PathBuf,

    /// Use a throwaway in-memory database
    #[arg(long)]
    memory: bool,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let sessions = if cli.memory {
        open_store_in_memory()?
    } else {
        open_store(&cli.db)?
    };
    let services = AdminServices::init(&sessions)?;
    let menu = build_main_menu(&services);

    let stdin = io::stdin();
    let mut console = StdConsole::new(stdin.lock(), io::stdout());
    match menu.handle(&mut console) {
        Ok(()) | Err(UiError::InputClosed) => {
            info!("event=app_exit module=cli status=ok");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
