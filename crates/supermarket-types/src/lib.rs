pub mod models;

pub use models::{
    DatabaseStats, FriendRequestStatus, LeaderboardEntry, RecentGame, ScoreStats, User,
    UserDetails,
};
