pub mod grant;
pub mod query;
