//! Connection self-test: schema presence, a read, and a rolled-back write.

use std::io::Write;
use std::path::Path;

use anyhow::{Result, bail};
use supermarket_db::Database;

use crate::credentials::hash_password;

pub const REQUIRED_TABLES: [&str; 4] = ["users", "scores", "friends", "friend_requests"];

pub fn run_check(db: &Database, db_path: &Path, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "=== Database Connection Test ===\n")?;
    writeln!(out, "[OK] Connected to: {}", db_path.display())?;

    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        if db.table_exists(table)? {
            writeln!(out, "[OK] Table '{table}' exists")?;
        } else {
            writeln!(out, "[ERROR] Table '{table}' does NOT exist")?;
            missing.push(table);
        }
    }
    if missing.contains(&"users") {
        bail!("required table 'users' is missing");
    }

    writeln!(out, "[INFO] Total users: {}", db.count_users()?)?;

    writeln!(out, "\n=== Current Users ===")?;
    let users = db.list_users()?;
    if users.is_empty() {
        writeln!(out, "  (No users found)")?;
    }
    for user in &users {
        writeln!(out, "  [{}] {} (created: {})", user.id, user.username, user.created_at)?;
    }

    writeln!(out, "\n=== Testing Insert Operation ===")?;
    let throwaway = format!("test_user_{}", chrono::Utc::now().timestamp_millis());
    let inserted = db.trial_insert(&throwaway, &hash_password("test_password"))?;
    writeln!(out, "[OK] Insert test successful (rows affected: {inserted})")?;
    if db.user_exists(&throwaway)? {
        bail!("throwaway user '{throwaway}' survived the rollback");
    }
    writeln!(out, "[OK] Transaction rolled back (test user not saved)")?;

    if !missing.is_empty() {
        bail!("missing tables: {}", missing.join(", "));
    }

    writeln!(out, "\n=== All Tests Passed ===")?;
    Ok(())
}
