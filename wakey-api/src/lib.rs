pub mod models;
pub mod units;
