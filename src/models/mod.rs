pub mod analytics;
pub mod calendar;
pub mod export;
pub mod habit;
pub mod journal;
pub mod log;
