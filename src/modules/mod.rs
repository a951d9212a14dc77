pub mod database;
pub mod extractors;
