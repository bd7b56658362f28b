pub mod day;
pub mod transaction;
