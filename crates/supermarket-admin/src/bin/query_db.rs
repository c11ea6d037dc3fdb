use anyhow::Context;
use clap::Parser;
use tracing::info;

use supermarket_admin::config::{self, DbArgs};
use supermarket_admin::menu;
use supermarket_db::Database;

/// Interactive query tool for the game database.
#[derive(Debug, Parser)]
#[command(name = "query-db", version)]
struct Cli {
    #[command(flatten)]
    db: DbArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init();
    let cli = Cli::parse();

    let db_path = cli.db.db_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("cannot open {}", db_path.display()))?;

    // The menu blocks on stdin, so it runs off the runtime and races Ctrl+C.
    // Stdout stays unlocked between writes so the interrupt arm can print.
    let session = tokio::task::spawn_blocking(move || {
        let mut input = std::io::stdin().lock();
        let mut out = std::io::stdout();
        menu::run_menu(&db, &mut input, &mut out)
    });

    tokio::select! {
        result = session => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
            println!("\n\nInterrupted by user.");
            // The blocking reader cannot be cancelled; leave without joining it.
            std::process::exit(0);
        }
    }
}
