//! StudentService: existence-checked CRUD over a `StudentStore`.

mod student;
pub use student::StudentService;
