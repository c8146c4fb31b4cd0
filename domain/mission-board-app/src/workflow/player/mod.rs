pub mod leaderboard;
pub mod login;
pub mod query;
pub mod register;
pub mod remove;
pub mod update;
