//! Acme Dashboard server entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│ Postgres │───▶│ Gateway  │───▶│  Client  │
//! │  (YAML)  │    │  (pool)  │    │  (axum)  │    │  (JSON)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```

use std::sync::Arc;

use acme_dashboard::auth::AuthService;
use acme_dashboard::config::AppConfig;
use acme_dashboard::store::Database;
use acme_dashboard::{gateway, logging};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() {
    let env = get_env();
    let mut config = AppConfig::load(&env);
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let _log_guard = logging::init_logging(&config);
    tracing::info!(
        "Starting acme_dashboard in {} mode (build {})",
        env,
        env!("GIT_HASH")
    );

    // Missing connection string is a fatal startup condition
    let Some(database_url) = config.resolve_database_url() else {
        eprintln!("❌ FATAL: No database connection string configured.");
        eprintln!("   Set DATABASE_URL or add database_url to config/{}.yaml", env);
        std::process::exit(1);
    };

    let Some(jwt_secret) = config.resolve_jwt_secret() else {
        eprintln!("❌ FATAL: No session signing secret configured.");
        eprintln!("   Set JWT_SECRET or add auth.jwt_secret to config/{}.yaml", env);
        std::process::exit(1);
    };

    let db = match Database::connect(&database_url).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            eprintln!("❌ FATAL: Failed to connect to PostgreSQL: {}", e);
            std::process::exit(1);
        }
    };

    let auth = Arc::new(AuthService::new(
        db.pool().clone(),
        jwt_secret,
        config.auth.session_ttl_hours,
    ));

    gateway::run_server(&config, db, auth).await;
}
