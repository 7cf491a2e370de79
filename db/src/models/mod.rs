pub mod api_response_log;
pub mod course;
pub mod learning_progress;
pub mod system_metric;
pub mod user;
pub mod user_performance_metric;

pub use api_response_log::Entity as ApiResponseLog;
pub use course::Entity as Course;
pub use learning_progress::Entity as LearningProgress;
pub use system_metric::Entity as SystemMetric;
pub use user::Entity as User;
pub use user_performance_metric::Entity as UserPerformanceMetric;

/// Rounds a value to two decimal places, matching how rates and averages are
/// reported by the API.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
