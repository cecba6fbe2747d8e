pub mod config;
pub mod dashboard;
pub mod explore;
pub mod export;
pub mod import;
