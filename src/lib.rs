// Library interface shared by the console binary and its tests

pub mod config;
pub mod filter;
pub mod fixtures;
pub mod models;
pub mod report;
pub mod session;
pub mod status;
pub mod timefmt;
