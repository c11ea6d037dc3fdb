//! Read-mostly reports over the game database.

use std::io::Write;

use anyhow::Result;
use supermarket_db::Database;
use supermarket_db::models::RawOutput;
use tracing::debug;

use crate::render::{banner, heavy_rule, light_rule};

pub fn show_stats(db: &Database, out: &mut dyn Write) -> Result<()> {
    let stats = db.stats()?;

    banner(out, "DATABASE STATISTICS")?;
    writeln!(out, "Total Users: {}", stats.total_users)?;
    writeln!(out, "Total Games Played: {}", stats.total_scores)?;
    writeln!(out, "Total Friendships: {}", stats.total_friendships)?;
    writeln!(out, "Pending Friend Requests: {}", stats.pending_requests)?;
    heavy_rule(out)?;
    Ok(())
}

pub fn list_users(db: &Database, out: &mut dyn Write) -> Result<()> {
    let users = db.list_users()?;

    banner(out, "ALL USERS")?;
    if users.is_empty() {
        writeln!(out, "(No users found)")?;
    } else {
        writeln!(out, "{:<5} {:<20} {:<25}", "ID", "Username", "Created At")?;
        light_rule(out)?;
        for user in &users {
            writeln!(out, "{:<5} {:<20} {:<25}", user.id, user.username, user.created_at)?;
        }
    }
    heavy_rule(out)?;
    Ok(())
}

pub fn show_leaderboard(db: &Database, out: &mut dyn Write, limit: u32) -> Result<()> {
    let leaders = db.leaderboard(limit)?;

    banner(out, &format!("TOP {limit} PLAYERS"))?;
    if leaders.is_empty() {
        writeln!(out, "(No scores found)")?;
    } else {
        writeln!(
            out,
            "{:<6} {:<20} {:<12} {:<8}",
            "Rank", "Username", "High Score", "Games"
        )?;
        light_rule(out)?;
        for (rank, leader) in leaders.iter().enumerate() {
            writeln!(
                out,
                "{:<6} {:<20} {:<12} {:<8}",
                rank + 1,
                leader.username,
                leader.high_score,
                leader.games_played
            )?;
        }
    }
    heavy_rule(out)?;
    Ok(())
}

/// Print everything known about one player. Returns `false` if the user does not exist.
pub fn user_details(db: &Database, out: &mut dyn Write, username: &str) -> Result<bool> {
    let Some(details) = db.user_details(username)? else {
        writeln!(out, "\nUser '{username}' not found!")?;
        return Ok(false);
    };

    banner(out, &format!("USER DETAILS: {username}"))?;
    writeln!(out, "ID: {}", details.user.id)?;
    writeln!(out, "Username: {}", details.user.username)?;
    writeln!(out, "Created: {}", details.user.created_at)?;

    let stats = &details.stats;
    writeln!(out, "\nGame Statistics:")?;
    writeln!(out, "  Games Played: {}", stats.games)?;
    writeln!(out, "  High Score: {}", stats.high_score.unwrap_or(0))?;
    writeln!(out, "  Average Score: {}", stats.average_display())?;
    writeln!(out, "  Total Score: {}", stats.total.unwrap_or(0))?;

    if !details.recent_games.is_empty() {
        writeln!(out, "\nRecent Games:")?;
        for game in &details.recent_games {
            writeln!(out, "  Score: {} - Played: {}", game.score, game.played_at)?;
        }
    }

    writeln!(out, "\nFriends ({}):", details.friends.len())?;
    if details.friends.is_empty() {
        writeln!(out, "  (No friends)")?;
    } else {
        for friend in &details.friends {
            writeln!(out, "  - {friend}")?;
        }
    }
    heavy_rule(out)?;
    Ok(true)
}

/// Execute an operator's SQL and print the outcome.
///
/// Statement errors are printed and swallowed so a typo does not end the
/// session; only output failures propagate.
pub fn custom_query(db: &Database, out: &mut dyn Write, sql: &str) -> Result<()> {
    debug!(sql, "Running custom query");

    match db.execute_raw(sql) {
        Ok(RawOutput::Rows { rows, .. }) if rows.is_empty() => {
            writeln!(out, "(No results)")?;
        }
        Ok(RawOutput::Rows { columns, rows }) => {
            writeln!(out)?;
            light_rule(out)?;
            writeln!(out, "{}", columns.join(" | "))?;
            light_rule(out)?;
            for row in &rows {
                writeln!(out, "{}", row.join(" | "))?;
            }
            light_rule(out)?;
            writeln!(out, "({} rows)", rows.len())?;
        }
        Ok(RawOutput::Affected(changed)) => {
            writeln!(out, "Query executed successfully. Rows affected: {changed}")?;
        }
        Err(e) => {
            writeln!(out, "ERROR: {e}")?;
        }
    }
    Ok(())
}
