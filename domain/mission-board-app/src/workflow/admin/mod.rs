pub mod login;
pub mod manage;
pub mod query;
pub mod seed;
