pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use db::DbPool;
pub use error::{AppError, AppResult};
pub use services::export_service::ExportService;
pub use services::habit_service::HabitService;
