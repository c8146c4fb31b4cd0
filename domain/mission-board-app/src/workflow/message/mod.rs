pub mod manage;
pub mod query;
pub mod read;
pub mod seed;
