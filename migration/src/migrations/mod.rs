pub mod m202508100001_create_users;
pub mod m202508100002_create_courses;
pub mod m202508100003_create_learning_progress;
pub mod m202508100004_create_user_performance_metrics;
pub mod m202508100005_create_api_response_logs;
pub mod m202508100006_create_system_metrics;
