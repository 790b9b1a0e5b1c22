pub mod calendar_service;
pub mod export_service;
pub mod habit_service;
pub mod score_service;
pub mod stats_service;
