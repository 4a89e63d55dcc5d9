use axum::{Router, http::header, routing::get};
use duo_ledger::api::{AppService, handlers::api_routes, openapi::ApiDoc};
use duo_ledger::config::CONFIG;
use duo_ledger::core::services::LedgerService;
use duo_ledger::infrastructure::{
    cache::in_memory::InMemoryCache,
    logging::in_memory::InMemoryLogging,
    storage::{Storage, csv_dir::CsvStorage, in_memory::InMemoryStorage, retry::RetryingStorage},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter(CONFIG.log_level.as_str()).init();
    info!("Starting with {:?}", *CONFIG);

    let backend: Box<dyn Storage> = match &CONFIG.data_dir {
        Some(dir) => {
            info!("Using CSV sheets in {}", dir.display());
            Box::new(CsvStorage::new(dir.clone()))
        }
        None => {
            info!("DATA_DIR not set, sheets are kept in memory");
            Box::new(InMemoryStorage::new())
        }
    };
    let storage = RetryingStorage::new(backend, CONFIG.retry_policy());
    let service: Arc<AppService> = Arc::new(LedgerService::new(
        storage,
        InMemoryLogging::new(),
        InMemoryCache::new(),
        CONFIG.ledger_options(),
    ));
    service.bootstrap().await?;

    let app = Router::new()
        // add / route with a simple health check
        .route("/", get(|| async { "OK" }))
        .nest("/api", api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST, http::Method::PUT])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
