use anyhow::Context;
use clap::Parser;
use tracing::info;

use supermarket_admin::config::{self, DbArgs};
use supermarket_admin::seed;
use supermarket_db::Database;

/// Seed the game database with sample accounts, scores and friendships.
#[derive(Debug, Parser)]
#[command(name = "seed-data", version)]
struct Cli {
    #[command(flatten)]
    db: DbArgs,

    /// Create the fixed login accounts (admin, player1, test) instead
    #[arg(long)]
    test_accounts: bool,
}

fn main() -> anyhow::Result<()> {
    config::init();
    let cli = Cli::parse();

    let db_path = cli.db.db_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("cannot seed {}", db_path.display()))?;

    let mut out = std::io::stdout().lock();
    if cli.test_accounts {
        seed::add_test_accounts(&db, &mut out)?;
    } else {
        let mut input = std::io::stdin().lock();
        seed::run(&db, &mut input, &mut out, &mut rand::rng())?;
    }

    info!("Seeding finished");
    Ok(())
}
