use std::io;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use supermarket_admin::{check, menu, seed};
use supermarket_db::{Database, DbError};

fn game_db() -> (tempfile::TempDir, PathBuf, Database) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("supermarket_game.db");
    std::fs::File::create(&path).unwrap();
    let db = Database::open(&path).unwrap();
    (dir, path, db)
}

#[test]
fn missing_database_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("supermarket_game.db");

    assert!(matches!(Database::open(&path), Err(DbError::NotFound(_))));
    assert!(matches!(Database::connect(&path), Err(DbError::NotFound(_))));
}

#[test]
fn reseeding_never_duplicates_users() {
    let (_dir, path, db) = game_db();
    let mut rng = StdRng::seed_from_u64(11);
    seed::run(&db, &mut "".as_bytes(), &mut io::sink(), &mut rng).unwrap();
    drop(db);

    let db = Database::open(&path).unwrap();
    let mut out: Vec<u8> = Vec::new();
    seed::run(&db, &mut "n\n".as_bytes(), &mut out, &mut rng).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Summary: 0 added, 10 skipped"));
    assert_eq!(db.count_users().unwrap(), seed::SAMPLE_USERNAMES.len() as i64);
}

#[test]
fn seeded_friendships_come_in_pairs() {
    let (_dir, _path, db) = game_db();
    let mut rng = StdRng::seed_from_u64(2024);
    seed::run(&db, &mut "".as_bytes(), &mut io::sink(), &mut rng).unwrap();

    let friends_of = |username: &str| db.user_details(username).unwrap().unwrap().friends;
    for username in db.list_usernames().unwrap() {
        for friend in friends_of(&username) {
            assert!(
                friends_of(&friend).contains(&username),
                "{username} -> {friend} has no reverse row"
            );
        }
    }
}

#[test]
fn menu_session_over_example_data() {
    let (_dir, path, db) = game_db();
    db.create_user("alice", "h").unwrap();
    db.create_user("bob", "h").unwrap();
    db.insert_score_batch("alice", &[1000, 2000]).unwrap();
    db.insert_score_batch("bob", &[1500]).unwrap();

    let script = "3\n2\n2\n4\nalice\n4\nnobody\n5\nselect * from users where username = 'nobody'\n0\n";
    let mut out: Vec<u8> = Vec::new();
    menu::run_menu(&db, &mut script.as_bytes(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let alice_rank = text.find("1      alice").unwrap();
    let bob_rank = text.find("2      bob").unwrap();
    assert!(alice_rank < bob_rank);
    assert!(text.contains("Games Played: 2"));
    assert!(text.contains("Average Score: 1500.0"));
    assert!(text.contains("Total Score: 3000"));
    assert!(text.contains("User 'nobody' not found!"));
    assert!(text.contains("(No results)"));
    assert!(text.ends_with("Goodbye!\n"));

    let mut out: Vec<u8> = Vec::new();
    check::run_check(&db, &path, &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("[INFO] Total users: 2"));
}
