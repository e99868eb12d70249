//! Role-gated dashboard gateway for the Medica storefront.
//!
//!
//!
//! # General Infrastructure
//! - Browser talks to this gateway with its Medica session cookie
//! - Gateway forwards the cookie verbatim to the backend, it never reads or validates it
//! - Backend stays the source of truth for sessions, carts and orders
//! - One `reqwest` connection pool is shared, each request gets its own cookie
//!
//!
//!
//! # Route Guarding
//!
//! **Goal**: Never hand dashboard data to the wrong role, and send people where
//! the storefront would have sent them.
//!
//! 1. Look up the caller's session through the auth service
//! 2. Run the dashboard proxy table (`/admin-dashboard…`, `/seller-dashboard…`)
//! 3. Run the page guard for the roles the page admits
//! 4. Any refusal answers `303 See Other` with `Location` set to the redirect
//! 5. Otherwise fetch the page's data from the backend and answer JSON
//!
//! A failed session lookup is treated the same as no session.
//!
//!
//!
//! # Routes
//!
//! | path                       | role     | data                          |
//! |----------------------------|----------|-------------------------------|
//! | `/admin-dashboard`         | Admin    | table statistics              |
//! | `/admin-dashboard/users`   | Admin    | users                         |
//! | `/admin-dashboard/orders`  | Admin    | every order                   |
//! | `/seller-dashboard`        | Seller   | seller statistics             |
//! | `/seller-dashboard/orders` | Seller   | the seller's orders           |
//! | `/dashboard`               | Customer | order stats and recent orders |
//! | `/cart`                    | Customer | cart lines and order summary  |
//! | `/health`                  | anyone   | `ok`                          |
//!
//!
//!
//! # Setup
//!
//! Run against a local backend.
//! ```sh
//! BACKEND_URL=http://localhost:5000 RUST_LOG=info cargo run -p medica-server
//! ```
//!
//! Log every backend payload.
//! ```sh
//! RUST_LOG=debug cargo run -p medica-server --features medica-client/verbose
//! ```
use std::{error::Error, time::Duration};

use axum::{
    Router,
    http::{
        Method,
        header::{CONTENT_TYPE, COOKIE},
    },
    routing::get,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{
    admin_dashboard_handler, admin_orders_handler, admin_users_handler, cart_handler,
    customer_dashboard_handler, health_handler, seller_dashboard_handler, seller_orders_handler,
};
use state::AppState;

pub fn router(state: std::sync::Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, COOKIE])
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/admin-dashboard", get(admin_dashboard_handler))
        .route("/admin-dashboard/users", get(admin_users_handler))
        .route("/admin-dashboard/orders", get(admin_orders_handler))
        .route("/seller-dashboard", get(seller_dashboard_handler))
        .route("/seller-dashboard/orders", get(seller_orders_handler))
        .route("/dashboard", get(customer_dashboard_handler))
        .route("/cart", get(cart_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), Box<dyn Error + Send + Sync>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = AppState::new(config);

    info!("Starting server...");
    let app = router(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!(
        "Server running on {address}, proxying {}",
        state.config.client.backend_url
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
