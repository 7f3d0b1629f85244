//! Orquesta Server - Orchestra Educational Program Management System
//!
//! REST API server for the orchestra's administrative backend.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orquesta_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("orquesta_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Orquesta Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration for the browser admin panel
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        // Programs
        .route("/programas", get(api::programs::list_programs))
        .route("/programas", post(api::programs::create_program))
        .route("/programas/:id", get(api::programs::get_program))
        .route("/programas/:id", put(api::programs::update_program))
        .route("/programas/:id", delete(api::programs::delete_program))
        // Students
        .route("/alumnos", get(api::students::list_students))
        .route("/alumnos", post(api::students::create_student))
        .route("/alumnos/:id", get(api::students::get_student))
        .route("/alumnos/:id", put(api::students::update_student))
        .route("/alumnos/:id", delete(api::students::delete_student))
        // Instruments
        .route("/instrumentos", get(api::instruments::list_instruments))
        .route("/instrumentos", post(api::instruments::create_instrument))
        .route("/instrumentos/:id", get(api::instruments::get_instrument))
        .route("/instrumentos/:id", put(api::instruments::update_instrument))
        .route("/instrumentos/:id", delete(api::instruments::delete_instrument))
        // Assignments
        .route("/asignaciones", get(api::assignments::list_assignments))
        .route("/asignaciones", post(api::assignments::create_assignment))
        .route("/asignaciones/:id", get(api::assignments::get_assignment))
        .route("/asignaciones/:id", put(api::assignments::update_assignment))
        .route("/asignaciones/:id", delete(api::assignments::delete_assignment))
        .route("/asignaciones/:id/devolver", post(api::assignments::return_assignment))
        // Movements
        .route("/movimientos", get(api::movements::list_movements))
        .route("/movimientos", post(api::movements::create_movement))
        .route("/movimientos/:id", get(api::movements::get_movement))
        .route("/movimientos/:id", put(api::movements::update_movement))
        .route("/movimientos/:id", delete(api::movements::delete_movement))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
