use serde::{Deserialize, Serialize};

/// A registered player. The credential never leaves the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: String,
}

/// One row of the leaderboard: a player's best score and how often they played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub high_score: i64,
    pub games_played: i64,
}

/// Whole-database counters shown by the stats and summary reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    pub total_users: i64,
    pub total_scores: i64,
    /// Directed rows in `friends`; one friendship contributes two.
    pub total_friendships: i64,
    pub pending_requests: i64,
}

/// Aggregates over a single player's scores.
///
/// The optional fields are `None` when the player has no games yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub games: i64,
    pub high_score: Option<i64>,
    pub average: Option<f64>,
    pub total: Option<i64>,
}

impl ScoreStats {
    /// Average rendered to one decimal place, or `0` without games.
    pub fn average_display(&self) -> String {
        match self.average {
            Some(avg) => format!("{avg:.1}"),
            None => "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentGame {
    pub score: i64,
    pub played_at: String,
}

/// Everything the user details report prints for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    pub user: User,
    pub stats: ScoreStats,
    pub recent_games: Vec<RecentGame>,
    pub friends: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl FriendRequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}
