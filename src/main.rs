//! Admin gate server - main entry point.
//!
//! Starts the Actix-web server with the session store, guards and routes.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use admin_gate::api;
use admin_gate::auth::{AuthSettings, Authenticator};
use admin_gate::config::{Config, SessionBackend, defaults};
use admin_gate::db::DbPool;
use admin_gate::middleware::RequestLogger;
use admin_gate::services;
use admin_gate::session::{MemorySessionStore, PgSessionStore, SessionStore};

/// Build the configured session store.
async fn build_store(config: &Config) -> Result<Arc<dyn SessionStore>, String> {
    match config.session_backend {
        SessionBackend::Memory => Ok(Arc::new(MemorySessionStore::new())),
        SessionBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| "DATABASE_URL is required for the postgres store".to_string())?;
            let pool = DbPool::new(url, defaults::DB_MAX_CONNECTIONS)
                .await
                .map_err(|e| e.to_string())?;
            pool.run_migrations().await.map_err(|e| e.to_string())?;
            Ok(Arc::new(PgSessionStore::new(pool)))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - SESSION_EXPIRY must be a positive number of seconds");
            error!("  - SESSION_STORE=postgres requires DATABASE_URL");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Admin Gate");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let settings = match AuthSettings::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("Invalid auth configuration: {}", e);
            std::process::exit(1);
        }
    };

    if settings.header_auth_enabled() {
        info!("Header authentication enabled");
    } else {
        info!("Header authentication disabled; session authentication only");
    }
    info!(
        "Session store: {} (ttl: {}s, lookup timeout: {}ms)",
        config.session_backend, config.session_ttl_secs, config.store_timeout_ms
    );

    if !config.session_backend.is_shared() {
        warn!(
            "In-memory session store: no sessions can be issued to it from outside this \
             process, so cookie sessions will not authenticate"
        );
    }

    let store = match build_store(&config).await {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize session store: {}", e);
            std::process::exit(1);
        }
    };

    let _sweeper = services::start_sweep_task(store.clone(), config.sweep_interval_secs);

    let logger = RequestLogger::with_admin_header(settings.admin_header.clone());
    let authenticator = web::Data::new(Authenticator::new(settings, store.clone()));
    let store_data: web::Data<dyn SessionStore> = web::Data::from(store);
    let bind_address = config.bind_address();

    let worker_count = if config.is_development() {
        4
    } else {
        num_cpus::get()
    };
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, worker_count
    );

    HttpServer::new(move || {
        App::new()
            .wrap(logger.clone())
            .app_data(authenticator.clone())
            .app_data(store_data.clone())
            .service(web::scope("/api/v1").configure(api::configure_health_routes))
            .configure(api::configure_page_routes)
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run()
    .await
}
