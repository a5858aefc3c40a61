// Library for tests to access modules

pub mod baseline;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod history_repo;
pub mod jstat_repo;
pub mod models;
pub mod runner;
pub mod version;
