use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing::{error, info, instrument};
use household_lists::data::json_file::JsonFilePersistence;
use household_lists::data::memory::InMemoryStore;
use household_lists::infrastructure::config::AppConfig;
use household_lists::infrastructure::ids::RandomIdGenerator;
use household_lists::infrastructure::logging::init_logging;
use household_lists::presentation::handlers::AppState;
use household_lists::presentation::middleware::{
    JwtAuthMiddleware, RequestIdMiddleware, TimingMiddleware,
};
use household_lists::presentation::routes;

#[tokio::main]
#[instrument]
async fn main() -> std::io::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let dotenv_loaded = dotenv::dotenv().is_ok();
    init_logging();
    info!(dotenv_loaded, "Logging initialized");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    info!(data_file = %config.data_file.display(), "Configuration loaded");

    let persistence = Arc::new(JsonFilePersistence::new(config.data_file.clone()));
    let store = InMemoryStore::open(persistence).await.map_err(|e| {
        error!(error = %e, "Failed to open store");
        std::io::Error::other(e.to_string())
    })?;

    let state = web::Data::new(AppState::new(
        Arc::new(store),
        Arc::new(RandomIdGenerator::new()),
        config.jwt_secret.clone(),
        config.token_ttl_secs,
    ));
    info!("Application state initialized");

    let jwt_secret = config.jwt_secret.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
            .wrap(Cors::permissive())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .configure(routes::configure)
    });

    let (host, port) = config.bind_addr();
    let server = server.bind((host.as_str(), port))?;
    info!(host = %host, port = port, "Starting HTTP server");
    server.run().await
}
