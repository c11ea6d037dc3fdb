/// Database row types. These map directly to SQLite rows and stay distinct
/// from the supermarket-types models so the credential column never leaks.
use supermarket_types::User;

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

/// Outcome of an operator-supplied SQL statement.
#[derive(Debug, PartialEq)]
pub enum RawOutput {
    /// A `SELECT`: column names plus every row rendered as text.
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Anything else: number of rows changed.
    Affected(usize),
}
