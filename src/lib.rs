//! Student registry: REST backend for student records.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::Student;
pub use routes::{app, common_routes, common_routes_with_ready, student_routes};
pub use service::StudentService;
pub use state::AppState;
pub use store::{ensure_database_exists, open_store, MemoryStudentStore, PgStudentStore, StudentStore};
