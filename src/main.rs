/**
 * Pattern Auth Server
 * Freehand-gesture plus symbol-sequence authentication
 *
 * Handles:
 * - Pattern comparison (similarity score + match decision)
 * - Behavioral analysis of a single drawing
 * - Enrollment with a confirmation drawing
 * - Two-step login (pattern, then symbols)
 */

use std::sync::Arc;
use tracing::{error, info};

use pattern_auth::auth::AuthService;
use pattern_auth::credentials::InMemoryCredentialStore;
use pattern_auth::server::{router, AppState};
use pattern_auth::{EngineConfig, PatternService, ServerConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    info!("Starting Pattern Auth Server");

    let engine_config = EngineConfig::from_env();
    let server_config = ServerConfig::from_env();
    info!(
        "Engine tolerances: sample_target={}, length_penalty={}, distance_scale={}, stroke_pause_ms={}",
        engine_config.sample_target,
        engine_config.length_penalty_weight,
        engine_config.distance_scale,
        engine_config.stroke_pause_ms
    );

    let patterns = PatternService::new(engine_config);
    let auth = AuthService::new(
        InMemoryCredentialStore::new(),
        patterns.clone(),
        server_config.clone(),
    );

    let state = AppState {
        patterns: Arc::new(patterns),
        auth: Arc::new(auth),
    };

    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(&server_config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", server_config.bind_addr, e);
            std::process::exit(1);
        }
    };

    info!("Pattern Auth Server listening on {}", server_config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
