//! Sample data for manual testing: accounts, scores and friendships.

use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use anyhow::Result;
use rand::Rng;
use rand::seq::IndexedRandom;
use supermarket_db::{Database, DbError};
use tracing::{info, warn};

use crate::credentials::hash_password;
use crate::render::{banner, heavy_rule, light_rule, prompt};

pub const SAMPLE_PASSWORD: &str = "password123";

pub const SAMPLE_USERNAMES: [&str; 10] = [
    "alice", "bob", "charlie", "diana", "eve", "frank", "grace", "henry", "ivy", "jack",
];

/// Fixed login accounts for exercising the client by hand.
pub const TEST_ACCOUNTS: [(&str, &str); 3] =
    [("admin", "admin123"), ("player1", "pass123"), ("test", "test")];

pub const GAMES_PER_USER: RangeInclusive<u32> = 2..=5;
pub const SCORE_RANGE: RangeInclusive<i64> = 500..=2500;
pub const MAX_FRIENDSHIP_ATTEMPTS: usize = 10;
pub const SUMMARY_TOP_PLAYERS: u32 = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UserSeedReport {
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Insert every sample account that does not exist yet.
pub fn add_sample_users(db: &Database, out: &mut dyn Write) -> Result<UserSeedReport> {
    banner(out, "ADDING SAMPLE USERS")?;

    let mut report = UserSeedReport::default();
    for username in SAMPLE_USERNAMES {
        match db.user_exists(username) {
            Ok(true) => {
                writeln!(out, "⏭️  User '{username}' already exists - skipped")?;
                report.skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                report_user_error(out, username, &e)?;
                report.failed += 1;
                continue;
            }
        }

        match db.create_user(username, &hash_password(SAMPLE_PASSWORD)) {
            Ok(id) => {
                info!(username, id, "Added sample user");
                writeln!(out, "✅ Added user: {username} (password: {SAMPLE_PASSWORD})")?;
                report.added += 1;
            }
            Err(DbError::UsernameTaken(_)) => {
                writeln!(out, "⏭️  User '{username}' already exists - skipped")?;
                report.skipped += 1;
            }
            Err(e) => {
                report_user_error(out, username, &e)?;
                report.failed += 1;
            }
        }
    }

    light_rule(out)?;
    write!(out, "Summary: {} added, {} skipped", report.added, report.skipped)?;
    if report.failed > 0 {
        write!(out, ", {} failed", report.failed)?;
    }
    writeln!(out)?;
    heavy_rule(out)?;
    Ok(report)
}

fn report_user_error(out: &mut dyn Write, username: &str, err: &DbError) -> std::io::Result<()> {
    warn!(username, error = %err, "Failed to add user");
    writeln!(out, "❌ Error adding user '{username}': {err}")
}

/// Insert the fixed test accounts, then list every stored user.
pub fn add_test_accounts(db: &Database, out: &mut dyn Write) -> Result<UserSeedReport> {
    banner(out, "🔧 CREATING TEST ACCOUNTS")?;

    let mut report = UserSeedReport::default();
    for (username, password) in TEST_ACCOUNTS {
        match db.create_user(username, &hash_password(password)) {
            Ok(_) => {
                writeln!(out, "✅ Created: {username} / {password}")?;
                report.added += 1;
            }
            Err(DbError::UsernameTaken(_)) => {
                writeln!(out, "⚠️  Already exists: {username}")?;
                report.skipped += 1;
            }
            Err(e) => {
                report_user_error(out, username, &e)?;
                report.failed += 1;
            }
        }
    }

    banner(out, "👥 ALL USERS IN DATABASE")?;
    for user in db.list_user_rows()? {
        writeln!(out, "\nUsername: {}", user.username)?;
        writeln!(out, "Password: {}", user.password_hash)?;
        writeln!(out, "Created:  {}", user.created_at)?;
        light_rule(out)?;
    }
    Ok(report)
}

/// Give every existing user a few random games. Returns the number of scores stored.
pub fn add_sample_scores<R: Rng>(db: &Database, out: &mut dyn Write, rng: &mut R) -> Result<usize> {
    let usernames = db.list_usernames()?;
    if usernames.is_empty() {
        writeln!(out, "\n⚠️  No users found. Please add users first.")?;
        return Ok(0);
    }

    banner(out, "ADDING SAMPLE SCORES")?;

    let mut added = 0;
    for username in &usernames {
        let games = rng.random_range(GAMES_PER_USER);
        let scores: Vec<i64> = (0..games).map(|_| rng.random_range(SCORE_RANGE)).collect();

        let outcomes = match db.insert_score_batch(username, &scores) {
            Ok(outcomes) => outcomes,
            Err(e) => {
                warn!(username = %username, error = %e, "Score batch failed");
                writeln!(out, "❌ Error adding scores for '{username}': {e}")?;
                continue;
            }
        };

        let mut stored = 0;
        for outcome in outcomes {
            match outcome {
                Ok(()) => stored += 1,
                Err(e) => {
                    warn!(username = %username, error = %e, "Failed to add score");
                    writeln!(out, "❌ Error adding score for '{username}': {e}")?;
                }
            }
        }
        added += stored;
        writeln!(out, "✅ Added {stored} scores for: {username}")?;
    }

    light_rule(out)?;
    writeln!(out, "Summary: {added} scores added")?;
    heavy_rule(out)?;
    Ok(added)
}

/// Link random pairs of users as friends. Returns the number of new friendships.
pub fn add_friendships<R: Rng>(db: &Database, out: &mut dyn Write, rng: &mut R) -> Result<usize> {
    let users = db.list_user_ids()?;
    if users.len() < 2 {
        writeln!(out, "\n⚠️  Need at least 2 users to create friendships.")?;
        return Ok(0);
    }

    banner(out, "ADDING SAMPLE FRIENDSHIPS")?;

    let attempts = MAX_FRIENDSHIP_ATTEMPTS.min(users.len() * 2);
    let mut added = 0;
    for _ in 0..attempts {
        let mut pair = users.choose_multiple(&mut *rng, 2);
        let (Some((a_id, a_name)), Some((b_id, b_name))) = (pair.next(), pair.next()) else {
            continue;
        };

        match db.friendship_exists(*a_id, *b_id) {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                warn!(error = %e, "Friendship lookup failed");
                writeln!(out, "❌ Error creating friendship: {e}")?;
                continue;
            }
        }

        match db.create_friendship(*a_id, *b_id) {
            Ok(()) => {
                writeln!(out, "✅ Created friendship: {a_name} ↔ {b_name}")?;
                added += 1;
            }
            Err(e) => {
                warn!(error = %e, "Failed to create friendship");
                writeln!(out, "❌ Error creating friendship: {e}")?;
            }
        }
    }

    light_rule(out)?;
    writeln!(out, "Summary: {added} friendships created")?;
    heavy_rule(out)?;
    Ok(added)
}

pub fn show_summary(db: &Database, out: &mut dyn Write) -> Result<()> {
    let stats = db.stats()?;

    banner(out, "DATABASE SUMMARY")?;
    writeln!(out, "📊 Total Users: {}", stats.total_users)?;
    writeln!(out, "🎮 Total Scores: {}", stats.total_scores)?;
    writeln!(out, "👥 Total Friendships: {}", stats.total_friendships)?;

    let top = db.leaderboard(SUMMARY_TOP_PLAYERS)?;
    if !top.is_empty() {
        writeln!(out, "\n🏆 Top {SUMMARY_TOP_PLAYERS} Players:")?;
        for (rank, player) in top.iter().enumerate() {
            writeln!(out, "   {}. {}: {} points", rank + 1, player.username, player.high_score)?;
        }
    }
    heavy_rule(out)?;
    Ok(())
}

/// Full seeding flow: users, then scores and friendships, then a summary.
///
/// When every sample user already exists the operator is asked before any
/// scores or friendships are added.
pub fn run<R: Rng>(
    db: &Database,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    rng: &mut R,
) -> Result<()> {
    banner(out, "SUPERMARKET GAME - ADD SAMPLE DATA")?;

    let users = add_sample_users(db, out)?;

    let add_activity = if users.added > 0 {
        true
    } else {
        writeln!(
            out,
            "\nℹ️  No new users added. You can still add scores and friendships."
        )?;
        let answer = prompt(input, out, "Add scores for existing users? (y/n): ")?;
        answer.is_some_and(|a| a.eq_ignore_ascii_case("y"))
    };

    if add_activity {
        add_sample_scores(db, out, rng)?;
        add_friendships(db, out, rng)?;
    }

    show_summary(db, out)?;

    writeln!(out, "\n✅ Done! Sample data has been added to the database.")?;
    writeln!(out, "You can now login with any of these accounts:")?;
    writeln!(out, "   Username: alice, bob, charlie, etc.")?;
    writeln!(out, "   Password: {SAMPLE_PASSWORD}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn sample_users_are_added_once() {
        let db = Database::open_in_memory().unwrap();
        let mut out: Vec<u8> = Vec::new();

        let first = add_sample_users(&db, &mut out).unwrap();
        assert_eq!(first.added, SAMPLE_USERNAMES.len());
        assert_eq!(first.skipped, 0);

        let mut out: Vec<u8> = Vec::new();
        let second = add_sample_users(&db, &mut out).unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(second.skipped, SAMPLE_USERNAMES.len());
        assert!(output(out).contains("User 'alice' already exists - skipped"));
        assert_eq!(db.count_users().unwrap(), SAMPLE_USERNAMES.len() as i64);
    }

    #[test]
    fn failed_user_insert_does_not_stop_the_rest() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            Ok(conn.execute_batch(
                "CREATE TRIGGER ban_charlie BEFORE INSERT ON users
                 WHEN NEW.username = 'charlie'
                 BEGIN SELECT RAISE(ABORT, 'charlie is banned'); END;",
            )?)
        })
        .unwrap();

        let mut out: Vec<u8> = Vec::new();
        let report = add_sample_users(&db, &mut out).unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.added, SAMPLE_USERNAMES.len() - 1);
        assert_eq!(db.count_users().unwrap(), SAMPLE_USERNAMES.len() as i64 - 1);
        assert!(db.user_exists("jack").unwrap());

        let text = output(out);
        assert!(text.contains("❌ Error adding user 'charlie'"));
        assert!(text.contains("Summary: 9 added, 0 skipped, 1 failed"));
    }

    #[test]
    fn clean_run_summary_omits_failures() {
        let db = Database::open_in_memory().unwrap();
        let mut out: Vec<u8> = Vec::new();
        add_sample_users(&db, &mut out).unwrap();
        let text = output(out);
        assert!(text.contains("Summary: 10 added, 0 skipped\n"));
        assert!(!text.contains("failed"));
    }

    #[test]
    fn sample_users_store_hashed_password() {
        let db = Database::open_in_memory().unwrap();
        add_sample_users(&db, &mut io::sink()).unwrap();

        let row = db.get_user_by_username("bob").unwrap().unwrap();
        assert_eq!(row.password_hash, hash_password(SAMPLE_PASSWORD));
    }

    #[test]
    fn test_accounts_tolerate_existing_rows() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("admin", "old").unwrap();

        let mut out: Vec<u8> = Vec::new();
        let report = add_test_accounts(&db, &mut out).unwrap();
        assert_eq!(report.added, 2);
        assert_eq!(report.skipped, 1);

        let text = output(out);
        assert!(text.contains("Already exists: admin"));
        assert!(text.contains("Created: test / test"));
        assert!(text.contains(&format!("Password: {}", hash_password("test"))));
    }

    #[test]
    fn scores_stay_within_bounds() {
        let db = Database::open_in_memory().unwrap();
        add_sample_users(&db, &mut io::sink()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let added = add_sample_scores(&db, &mut io::sink(), &mut rng).unwrap();
        assert_eq!(db.stats().unwrap().total_scores, added as i64);

        for username in SAMPLE_USERNAMES {
            let stats = db.score_stats(username).unwrap();
            assert!(GAMES_PER_USER.contains(&(stats.games as u32)));
            let high = stats.high_score.unwrap();
            assert!(SCORE_RANGE.contains(&high));
        }
    }

    #[test]
    fn scores_need_users() {
        let db = Database::open_in_memory().unwrap();
        let mut out: Vec<u8> = Vec::new();
        let added = add_sample_scores(&db, &mut out, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(added, 0);
        assert!(output(out).contains("No users found"));
    }

    #[test]
    fn friendships_are_symmetric() {
        let db = Database::open_in_memory().unwrap();
        add_sample_users(&db, &mut io::sink()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let added = add_friendships(&db, &mut io::sink(), &mut rng).unwrap();
        assert!(added <= MAX_FRIENDSHIP_ATTEMPTS);
        assert_eq!(db.stats().unwrap().total_friendships, 2 * added as i64);

        let one_sided: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT COUNT(*) FROM friends f
                     WHERE NOT EXISTS (
                         SELECT 1 FROM friends r
                         WHERE r.user_id = f.friend_id AND r.friend_id = f.user_id
                     )",
                    [],
                    |r| r.get(0),
                )?)
            })
            .unwrap();
        assert_eq!(one_sided, 0);
    }

    #[test]
    fn friendships_need_two_users() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("solo", "h").unwrap();
        let mut out: Vec<u8> = Vec::new();

        let added = add_friendships(&db, &mut out, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(added, 0);
        assert!(output(out).contains("Need at least 2 users"));
    }

    #[test]
    fn failed_friendship_is_reported_and_skipped() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("a", "h").unwrap();
        db.create_user("b", "h").unwrap();
        db.with_conn(|conn| {
            Ok(conn.execute_batch(
                "CREATE TRIGGER no_friends BEFORE INSERT ON friends
                 BEGIN SELECT RAISE(ABORT, 'friendships closed'); END;",
            )?)
        })
        .unwrap();

        let mut out: Vec<u8> = Vec::new();
        let added = add_friendships(&db, &mut out, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(added, 0);
        assert_eq!(db.stats().unwrap().total_friendships, 0);

        let text = output(out);
        assert_eq!(text.matches("❌ Error creating friendship").count(), 4);
        assert!(text.contains("Summary: 0 friendships created"));
    }

    #[test]
    fn two_users_never_get_duplicate_friendships() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("a", "h").unwrap();
        db.create_user("b", "h").unwrap();

        // Up to four attempts on the only possible pair.
        let added = add_friendships(&db, &mut io::sink(), &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(added, 1);
        assert_eq!(db.stats().unwrap().total_friendships, 2);
    }

    #[test]
    fn rerun_declined_adds_nothing() {
        let db = Database::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        run(&db, &mut "".as_bytes(), &mut io::sink(), &mut rng).unwrap();
        let before = db.stats().unwrap();

        let mut out: Vec<u8> = Vec::new();
        run(&db, &mut "n\n".as_bytes(), &mut out, &mut rng).unwrap();
        assert_eq!(db.stats().unwrap(), before);
        assert!(output(out).contains("Add scores for existing users? (y/n): "));
    }

    #[test]
    fn rerun_accepted_adds_scores() {
        let db = Database::open_in_memory().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        run(&db, &mut "".as_bytes(), &mut io::sink(), &mut rng).unwrap();
        let before = db.stats().unwrap();

        run(&db, &mut "Y\n".as_bytes(), &mut io::sink(), &mut rng).unwrap();
        let after = db.stats().unwrap();
        assert_eq!(after.total_users, before.total_users);
        assert!(after.total_scores > before.total_scores);
    }
}
