//! Services layer - backend access and background execution

pub mod api;
pub mod request_runner;

pub use api::{ApiError, CatalogClient, CourseQuery};
pub use request_runner::{ApiResponse, RequestRunner};
