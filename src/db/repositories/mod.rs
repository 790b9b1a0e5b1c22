pub mod habit_repository;
pub mod journal_repository;
pub mod log_repository;
