use std::path::PathBuf;

use clap::Args;

/// Where the game server keeps its database, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/supermarket_game.db";

pub const DB_PATH_ENV: &str = "SUPERMARKET_DB_PATH";

/// Database location flag shared by every tool.
#[derive(Debug, Clone, Default, Args)]
pub struct DbArgs {
    /// Path to the game database [env: SUPERMARKET_DB_PATH]
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,
}

impl DbArgs {
    /// Flag first, then the environment, then the default path.
    pub fn db_path(&self) -> PathBuf {
        resolve_db_path(self.db.clone(), std::env::var(DB_PATH_ENV).ok())
    }
}

pub fn resolve_db_path(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

/// Load `.env` if present and install the log subscriber.
///
/// Logs go to stderr and stay at `warn` unless `RUST_LOG` says otherwise,
/// so they never interleave with reports on stdout.
pub fn init() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
