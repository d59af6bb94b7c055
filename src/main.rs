//! besties-admin entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Warn about relaxed mode or development credentials
//! 3. Build router with admin gate + static file serving
//! 4. Start Axum server
//!
//! Also supports a `gen-token` subcommand for generating an admin secret token.

use besties_admin::{
    auth::{generate_secret_token, AppState},
    config::Config,
    routes,
};
use tower_http::cors::CorsLayer;

fn print_usage() {
    eprintln!("Usage: besties-admin [gen-token]");
    eprintln!();
    eprintln!("Without arguments, run the server.");
    eprintln!("gen-token prints a random value for ADMIN_SECRET_TOKEN.");
    eprintln!();
    eprintln!("Then set in .env:");
    eprintln!("  APP_ENV=production");
    eprintln!("  ADMIN_USERNAME=<username>");
    eprintln!("  ADMIN_PASSWORD=<password>");
    eprintln!("  ADMIN_SECRET_TOKEN=<output>");
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None => {}
        Some("gen-token") if args.len() == 2 => {
            println!("{}", generate_secret_token());
            return;
        }
        Some(_) => {
            print_usage();
            std::process::exit(1);
        }
    }

    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config");
            std::process::exit(1);
        }
    };
    tracing::info!(
        environment = config.mode.environment(),
        "Starting besties-admin on {}",
        config.bind_addr
    );

    if !config.mode.is_strict() {
        tracing::warn!(
            prefix = %config.protected_prefix,
            "Relaxed mode: admin gate is disabled (set APP_ENV=production to enforce)"
        );
    } else if config.uses_development_defaults() {
        tracing::warn!("Strict mode is running with development default admin credentials");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(config);

    // Explicit CORS: deny all cross-origin requests (single-origin deployment).
    let app = routes::app(state).layer(CorsLayer::new());

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %bind_addr, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!("Listening on {}", bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
