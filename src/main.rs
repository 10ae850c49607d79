use fitplan_rs::{app, config, state};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitplan_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();
    let port = config.port;
    let dataset_path = config.dataset_path.display().to_string();
    let state = state::AppState::new(config);

    // Warm the dataset cache so a bad path is visible at startup, not on the
    // first request.
    match state.records() {
        Ok(records) => tracing::info!("Dataset ready: {} profiles", records.len()),
        Err(err) => tracing::warn!("Dataset not loadable yet ({}): {}", dataset_path, err),
    }

    let app = app(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("FitPlan-RS listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Generate plan: POST http://{}/api/generate-plan", addr);
    tracing::info!("User stats: GET http://{}/api/user-stats", addr);

    axum::serve(listener, app).await.unwrap();
}
