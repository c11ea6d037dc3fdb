use rusqlite::Connection;
use rusqlite::types::ValueRef;
use supermarket_types::{
    DatabaseStats, FriendRequestStatus, LeaderboardEntry, RecentGame, ScoreStats, User,
    UserDetails,
};

use crate::models::{RawOutput, UserRow};
use crate::{Database, DbError, Result};

/// Number of games shown in a player's recent history.
pub const RECENT_GAMES: u32 = 5;

impl Database {
    // -- Users --

    /// Insert a user and return the assigned id.
    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
                (username, password_hash),
            )
            .map_err(|e| {
                let err = DbError::from(e);
                if err.is_unique_violation() {
                    DbError::UsernameTaken(username.to_string())
                } else {
                    err
                }
            })?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn user_exists(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT id FROM users WHERE username = ?1",
                    [username],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    /// All users, newest first.
    pub fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, created_at FROM users ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// All users including the stored credential, in insertion order.
    pub fn list_user_rows(&self) -> Result<Vec<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT id, username, password_hash, created_at FROM users ORDER BY id")?;
            let rows = stmt
                .query_map([], map_user_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// `(id, username)` for every user, in insertion order.
    pub fn list_user_ids(&self) -> Result<Vec<(i64, String)>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, username FROM users ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn list_usernames(&self) -> Result<Vec<String>> {
        Ok(self
            .list_user_ids()?
            .into_iter()
            .map(|(_, username)| username)
            .collect())
    }

    /// Insert a user inside a transaction and roll it back.
    /// Returns the number of rows the insert reported.
    pub fn trial_insert(&self, username: &str, password_hash: &str) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let inserted = tx.execute(
                "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
                (username, password_hash),
            )?;
            tx.rollback()?;
            Ok(inserted)
        })
    }

    // -- Scores --

    /// Insert a player's batch of scores and commit once at the end.
    ///
    /// A failed insert does not abort the batch; each score gets its own
    /// outcome in the returned list, in input order.
    pub fn insert_score_batch(&self, username: &str, scores: &[i64]) -> Result<Vec<Result<()>>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let outcomes: Vec<Result<()>> = scores
                .iter()
                .map(|&score| {
                    tx.execute(
                        "INSERT INTO scores (username, score, played_at) VALUES (?1, ?2, datetime('now'))",
                        rusqlite::params![username, score],
                    )
                    .map(|_| ())
                    .map_err(DbError::from)
                })
                .collect();
            tx.commit()?;
            Ok(outcomes)
        })
    }

    /// Best score per player, highest first. Equal scores order by username.
    pub fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT username, MAX(score) AS high_score, COUNT(*) AS games_played
                 FROM scores
                 GROUP BY username
                 ORDER BY high_score DESC, username ASC
                 LIMIT ?1",
            )?;
            let rows = stmt
                .query_map([limit], |row| {
                    Ok(LeaderboardEntry {
                        username: row.get(0)?,
                        high_score: row.get(1)?,
                        games_played: row.get(2)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn score_stats(&self, username: &str) -> Result<ScoreStats> {
        self.with_conn(|conn| query_score_stats(conn, username))
    }

    /// Identity, statistics, recent games and friends for one player.
    /// Returns `None` without running any further query when the user is unknown.
    pub fn user_details(&self, username: &str) -> Result<Option<UserDetails>> {
        self.with_conn(|conn| {
            let Some(row) = query_user_by_username(conn, username)? else {
                return Ok(None);
            };

            let stats = query_score_stats(conn, username)?;
            let recent_games = query_recent_games(conn, username, RECENT_GAMES)?;
            let friends = query_friends_of(conn, row.id)?;

            Ok(Some(UserDetails {
                user: row.into(),
                stats,
                recent_games,
                friends,
            }))
        })
    }

    // -- Friends --

    /// True when a row links the two users in either direction.
    pub fn friendship_exists(&self, user_a: i64, user_b: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM friends
                     WHERE (user_id = ?1 AND friend_id = ?2)
                        OR (user_id = ?2 AND friend_id = ?1)
                     LIMIT 1",
                    [user_a, user_b],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Store both directions of a friendship, or neither.
    pub fn create_friendship(&self, user_a: i64, user_b: i64) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO friends (user_id, friend_id) VALUES (?1, ?2)",
                [user_a, user_b],
            )?;
            tx.execute(
                "INSERT INTO friends (user_id, friend_id) VALUES (?1, ?2)",
                [user_b, user_a],
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    // -- Stats --

    pub fn count_users(&self) -> Result<i64> {
        self.with_conn(|conn| count(conn, "SELECT COUNT(*) FROM users"))
    }

    pub fn stats(&self) -> Result<DatabaseStats> {
        self.with_conn(|conn| {
            let pending_requests = conn.query_row(
                "SELECT COUNT(*) FROM friend_requests WHERE status = ?1",
                [FriendRequestStatus::Pending.as_str()],
                |row| row.get(0),
            )?;

            Ok(DatabaseStats {
                total_users: count(conn, "SELECT COUNT(*) FROM users")?,
                total_scores: count(conn, "SELECT COUNT(*) FROM scores")?,
                total_friendships: count(conn, "SELECT COUNT(*) FROM friends")?,
                pending_requests,
            })
        })
    }

    pub fn table_exists(&self, name: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [name],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    // -- Ad-hoc SQL --

    /// Run an operator-supplied statement verbatim. Never feed this untrusted input.
    pub fn execute_raw(&self, sql: &str) -> Result<RawOutput> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            if !is_select(sql) {
                // Step to completion, dropping any rows a PRAGMA or WITH returns.
                let mut cursor = stmt.query([])?;
                while cursor.next()?.is_some() {}
                drop(cursor);
                let changed = if stmt.readonly() { 0 } else { conn.changes() as usize };
                return Ok(RawOutput::Affected(changed));
            }

            let columns: Vec<String> = stmt
                .column_names()
                .into_iter()
                .map(String::from)
                .collect();
            let width = columns.len();

            let mut rows = Vec::new();
            let mut cursor = stmt.query([])?;
            while let Some(row) = cursor.next()? {
                let mut values = Vec::with_capacity(width);
                for idx in 0..width {
                    values.push(render_value(row.get_ref(idx)?));
                }
                rows.push(values);
            }

            Ok(RawOutput::Rows { columns, rows })
        })
    }
}

/// Whether a statement starts with `select`, ignoring case and leading whitespace.
pub fn is_select(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("select"))
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

fn count(conn: &Connection, sql: &str) -> Result<i64> {
    Ok(conn.query_row(sql, [], |row| row.get(0))?)
}

fn map_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, created_at FROM users WHERE username = ?1",
    )?;

    let row = stmt.query_row([username], map_user_row).optional()?;

    Ok(row)
}

fn query_score_stats(conn: &Connection, username: &str) -> Result<ScoreStats> {
    let stats = conn.query_row(
        "SELECT COUNT(*), MAX(score), AVG(score), SUM(score)
         FROM scores WHERE username = ?1",
        [username],
        |row| {
            Ok(ScoreStats {
                games: row.get(0)?,
                high_score: row.get(1)?,
                average: row.get(2)?,
                total: row.get(3)?,
            })
        },
    )?;
    Ok(stats)
}

fn query_recent_games(conn: &Connection, username: &str, limit: u32) -> Result<Vec<RecentGame>> {
    let mut stmt = conn.prepare(
        "SELECT score, played_at
         FROM scores
         WHERE username = ?1
         ORDER BY played_at DESC, id DESC
         LIMIT ?2",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![username, limit], |row| {
            Ok(RecentGame {
                score: row.get(0)?,
                played_at: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_friends_of(conn: &Connection, user_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT u.username
         FROM friends f
         JOIN users u ON u.id = f.friend_id
         WHERE f.user_id = ?1
         ORDER BY u.username",
    )?;

    let rows = stmt
        .query_map([user_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
