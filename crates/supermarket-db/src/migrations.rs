use rusqlite::Connection;
use tracing::debug;

use crate::Result;

/// Create any missing table of the canonical schema. Safe to run on every open.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            username        TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Scores reference players by username, not by id.
        CREATE TABLE IF NOT EXISTS scores (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL,
            score       INTEGER NOT NULL,
            played_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_scores_username
            ON scores(username, played_at);

        -- One friendship is stored as two directed rows.
        CREATE TABLE IF NOT EXISTS friends (
            user_id     INTEGER NOT NULL REFERENCES users(id),
            friend_id   INTEGER NOT NULL REFERENCES users(id),
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (user_id, friend_id)
        );

        CREATE TABLE IF NOT EXISTS friend_requests (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            from_user_id    INTEGER NOT NULL REFERENCES users(id),
            to_user_id      INTEGER NOT NULL REFERENCES users(id),
            status          TEXT NOT NULL DEFAULT 'pending'
                            CHECK (status IN ('pending', 'accepted', 'rejected')),
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    debug!("Database migrations complete");
    Ok(())
}
