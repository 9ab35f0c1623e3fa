//! Student and course services over any `Store`.

mod courses;
mod students;
mod validation;
pub use courses::CourseService;
pub use students::StudentService;
pub use validation::RequestValidator;
