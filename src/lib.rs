pub mod analysis;
pub mod config;
pub mod extract;
pub mod inspect;
pub mod report;
pub mod units;
