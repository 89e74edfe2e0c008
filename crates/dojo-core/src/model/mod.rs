// ── Domain model ──

pub mod course;
pub mod course_id;
pub mod language;
pub mod learning_path;

pub use course::Course;
pub use course_id::CourseId;
pub use language::language_label;
pub use learning_path::{AuthenticatedUser, EnterpriseCustomer, LearningPath, LearningPathInfo};
