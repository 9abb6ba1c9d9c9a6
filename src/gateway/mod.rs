pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{AuthService, handlers as auth_handlers, session_gate};
use crate::config::AppConfig;
use crate::store::Database;
use state::AppState;

/// Start the HTTP gateway server
pub async fn run_server(config: &AppConfig, db: Arc<Database>, auth: Arc<AuthService>) {
    let state = Arc::new(AppState::new(db, auth));

    // ==========================================================================
    // Auth routes (public by policy)
    // ==========================================================================
    let auth_routes = Router::new()
        .route(
            "/login",
            get(auth_handlers::login_page).post(auth_handlers::login),
        )
        .route("/logout", post(auth_handlers::logout));

    // ==========================================================================
    // Dashboard routes (the session gate redirects unauthenticated requests)
    // ==========================================================================
    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::overview))
        .route(
            "/invoices",
            get(handlers::invoices::list_invoices).post(handlers::invoices::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(handlers::invoices::get_invoice).post(handlers::invoices::update_invoice),
        )
        .route(
            "/invoices/{id}/delete",
            post(handlers::invoices::delete_invoice),
        )
        .route("/customers", get(handlers::customers::list_customers));

    // The gate runs once per request over the whole surface; its policy
    // only restricts the /dashboard prefix.
    let app = Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .route("/query", get(handlers::admin::sample_query))
        .merge(auth_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(from_fn_with_state(state.clone(), session_gate));

    // [SECURITY] Destructive seeding route - only compiled when the 'seed-api'
    // feature is enabled. Production builds MUST be compiled with
    // `--no-default-features` to exclude this.
    #[cfg(feature = "seed-api")]
    let app = app.route("/seed", get(handlers::admin::run_seed));

    let app = app
        .with_state(state)
        // OpenAPI / Swagger UI (stateless, added after with_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    // Bind address
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("❌ FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "   Hint: Port {} may already be in use. Check with: lsof -i :{}",
                config.gateway.port, config.gateway.port
            );
            std::process::exit(1);
        }
    };

    println!("🚀 Gateway listening on http://{}", addr);
    println!("📖 API Docs: http://{}/docs", addr);
    println!("🔒 Protected: /dashboard/* (session required)");
    #[cfg(feature = "seed-api")]
    println!("⚠️  Seed endpoint enabled: GET /seed (dev builds only)");

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
