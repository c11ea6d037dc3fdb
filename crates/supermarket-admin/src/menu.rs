use std::io::{BufRead, Write};

use anyhow::Result;
use supermarket_db::Database;
use tracing::debug;

use crate::render::{heavy_rule, prompt};
use crate::report;

pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Stats,
    ListUsers,
    Leaderboard,
    UserDetails,
    CustomQuery,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Stats),
            "2" => Some(Self::ListUsers),
            "3" => Some(Self::Leaderboard),
            "4" => Some(Self::UserDetails),
            "5" => Some(Self::CustomQuery),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Empty input selects the default; anything else must be a non-negative number.
pub fn parse_limit(input: &str) -> Option<u32> {
    let input = input.trim();
    if input.is_empty() {
        return Some(DEFAULT_LEADERBOARD_LIMIT);
    }
    input.parse().ok()
}

fn print_menu(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out)?;
    heavy_rule(out)?;
    writeln!(out, "SUPERMARKET GAME - DATABASE QUERY TOOL")?;
    heavy_rule(out)?;
    writeln!(out, "1. Show Statistics")?;
    writeln!(out, "2. List All Users")?;
    writeln!(out, "3. Show Leaderboard")?;
    writeln!(out, "4. User Details")?;
    writeln!(out, "5. Custom SQL Query")?;
    writeln!(out, "0. Exit")?;
    heavy_rule(out)
}

/// Interactive loop: dispatch one report per choice until exit or end of input.
pub fn run_menu(db: &Database, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    loop {
        print_menu(out)?;
        let Some(choice) = prompt(input, out, "Select option: ")? else {
            break;
        };
        debug!(choice = %choice, "Menu selection");

        match MenuChoice::parse(&choice) {
            Some(MenuChoice::Stats) => report::show_stats(db, out)?,
            Some(MenuChoice::ListUsers) => report::list_users(db, out)?,
            Some(MenuChoice::Leaderboard) => {
                let Some(raw) = prompt(input, out, "Top N players (default 10): ")? else {
                    break;
                };
                match parse_limit(&raw) {
                    Some(limit) => report::show_leaderboard(db, out, limit)?,
                    None => writeln!(out, "Invalid number: '{raw}'")?,
                }
            }
            Some(MenuChoice::UserDetails) => {
                let Some(username) = prompt(input, out, "Enter username: ")? else {
                    break;
                };
                if !username.is_empty() {
                    report::user_details(db, out, &username)?;
                }
            }
            Some(MenuChoice::CustomQuery) => {
                writeln!(out, "\nEnter SQL query (or 'back' to return):")?;
                let Some(sql) = prompt(input, out, "> ")? else {
                    break;
                };
                if !sql.eq_ignore_ascii_case("back") {
                    report::custom_query(db, out, &sql)?;
                }
            }
            Some(MenuChoice::Exit) => break,
            None => writeln!(out, "Invalid option!")?,
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}
