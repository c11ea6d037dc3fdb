use clap::Parser;

use supermarket_admin::check;
use supermarket_admin::config::{self, DbArgs};
use supermarket_db::Database;

/// Verify the game database is reachable, complete and writable.
#[derive(Debug, Parser)]
#[command(name = "db-check", version)]
struct Cli {
    #[command(flatten)]
    db: DbArgs,
}

fn main() -> std::process::ExitCode {
    config::init();
    let cli = Cli::parse();
    let db_path = cli.db.db_path();

    let mut out = std::io::stdout().lock();
    let result = Database::connect(&db_path)
        .map_err(anyhow::Error::from)
        .and_then(|db| check::run_check(&db, &db_path, &mut out));

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}
