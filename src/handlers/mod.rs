//! HTTP handlers for student CRUD and the hello endpoint.

pub mod hello;
pub mod student;
pub use hello::*;
pub use student::*;
