use axum::middleware::from_fn_with_state;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use util::{cache::ResponseCache, config, state::AppState};

/// Sets up tracing with a daily-rolling log file and an optional stdout
/// layer. The returned guard must stay alive for the duration of the
/// program, or buffered log lines are lost.
fn init_logging() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", config::log_file());
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_new(config::log_level()).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer().with_writer(file_writer).with_ansi(false);
    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if config::log_to_stdout() {
        registry.with(fmt::layer()).init();
    } else {
        registry.init();
    }

    guard
}

#[tokio::main]
async fn main() {
    let _log_guard = init_logging();

    let db = db::connect().await;
    let state = AppState::new(db, ResponseCache::new());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = axum::Router::new()
        .nest("/api", api::routes::routes(state.clone()))
        .layer(from_fn_with_state(state, api::telemetry::record_request))
        .layer(cors);

    let host = config::host();
    let addr = SocketAddr::new(
        host.parse().expect("HOST must be a valid IP address"),
        config::port(),
    );
    tracing::info!("Starting {} on {addr}", config::project_name());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}
