use db::models::course::{Difficulty, Model as CourseModel};
use serde::{Deserialize, Serialize};
use validator::Validate;

fn default_difficulty() -> Difficulty {
    Difficulty::Beginner
}

/// Payload for creating a course. New courses are always active.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    #[validate(range(min = 0, message = "total_lessons cannot be negative"))]
    #[serde(default)]
    pub total_lessons: i32,
}

/// Payload for editing a course. All editable fields must be supplied.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub is_active: bool,
    #[validate(range(min = 0, message = "total_lessons cannot be negative"))]
    pub total_lessons: i32,
}

/// A course paired with its enrollment count, as ranked by the popular
/// courses endpoint.
#[derive(Serialize)]
pub struct RankedCourse {
    #[serde(flatten)]
    pub course: CourseModel,
    pub enrollment_count: i64,
}
