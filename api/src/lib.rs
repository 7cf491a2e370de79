pub mod response;
pub mod routes;
pub mod telemetry;
