//! Enrollment API: students, courses, and the enrollment relation over REST.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod openapi;
pub mod request;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use routes::{app, common_routes, course_routes, student_routes};
pub use seed::seed_demo_data;
pub use service::{CourseService, StudentService};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Store};
