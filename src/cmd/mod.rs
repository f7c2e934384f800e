pub mod leaderboard;
pub mod predict;
pub mod score;
