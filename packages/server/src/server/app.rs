//! Application setup and router wiring.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{health, inventory, ips, ledger, tool};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
}

/// Build the Axum application router.
///
/// Route layout mirrors the public API: the OTP ledger under /api/phones,
/// inventory under /api/get/phones, the IP ledger under /api/ips, and the
/// tool endpoints under /tool.
pub fn build_app(pool: PgPool, config: Arc<Config>) -> Router {
    let state = AppState {
        db_pool: pool,
        config,
    };

    let ledger_routes = Router::new()
        .route("/", post(ledger::upsert_entry).get(ledger::list_entries))
        .route("/check", get(ledger::hourly_check))
        .route("/phone/:phone", get(ledger::get_by_phone))
        .route(
            "/:id",
            put(ledger::update_entry).delete(ledger::delete_entry),
        );

    let inventory_routes = Router::new()
        .route(
            "/phones",
            post(inventory::create_phone).get(inventory::list_phones),
        )
        .route("/phones/upload", post(inventory::upload_phones))
        .route("/phones/random", get(inventory::random_phone))
        .route("/phones/is_taken", put(inventory::set_taken_for_all))
        .route("/phones/:id/is_taken", put(inventory::set_taken_by_id))
        .route(
            "/phones/:id",
            get(inventory::get_phone)
                .put(inventory::update_phone)
                .delete(inventory::delete_phone),
        );

    let ip_routes = Router::new()
        .route("/", post(ips::create_ip).get(ips::list_ips))
        .route("/check/:ip", get(ips::check_ip))
        .route("/:id", put(ips::update_ip).delete(ips::delete_ip));

    let tool_routes = Router::new()
        .route("/version", get(tool::version))
        .route("/apk", get(tool::download_apk));

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api/phones", ledger_routes)
        .nest("/api/get", inventory_routes)
        .nest("/api/ips", ip_routes)
        .nest("/tool", tool_routes)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Bulk import files can run large
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}
