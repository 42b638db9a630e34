use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reservation_server::catalog::load_catalog;
use reservation_server::engine::ReservationEngine;
use reservation_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reservation_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_path =
        std::env::var("TRAIN_DATA_PATH").unwrap_or_else(|_| "data/trains.json".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8081);

    // Load the seed catalog (fail fast if unavailable)
    let catalog = load_catalog(&data_path)
        .unwrap_or_else(|e| panic!("Failed to load train data from {data_path}: {e}"));
    tracing::info!("loaded {} train(s) from {}", catalog.len(), data_path);

    let engine = ReservationEngine::new(Arc::new(catalog));
    let state = AppState::new(engine);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Seat reservation service listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /health                    - Health check");
    println!("  GET  /data_for_train/:train_id  - Seat state for a train");
    println!("  POST /reserve                   - Reserve seats (multipart form)");
    println!("  GET  /reset/:train_id           - Clear all reservations on a train");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
