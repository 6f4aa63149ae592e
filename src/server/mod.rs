pub mod handlers;
mod types;

pub use types::*;

use crate::{config::Config, model, pipeline::InferenceService, Result};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn run(config: Config) -> Result<()> {
    // Models are loaded once and shared read-only by every request
    let mut services = Vec::with_capacity(config.services.len());
    for service_config in &config.services {
        let model = model::load(&service_config.model_path).await?;
        info!(
            "Service {} ready on {} and {}",
            service_config.name, service_config.single_route, service_config.batch_route
        );
        services.push(Arc::new(InferenceService::new(service_config.clone(), model)));
    }

    let app = router(services, config.server.max_upload_bytes);

    // Start server
    let addr = SocketAddr::new(
        config.server.host.parse()?,
        config.server.port,
    );

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router: the catalog routes plus one route pair per service.
pub fn router(services: Vec<Arc<InferenceService>>, max_upload_bytes: usize) -> Router {
    let catalog: handlers::Catalog = Arc::new(
        services
            .iter()
            .map(|service| ServiceInfo::from(service.as_ref()))
            .collect(),
    );

    let mut app: Router = Router::new()
        .route("/", get(handlers::home))
        .route("/v1/models", get(handlers::models))
        .with_state(catalog);

    for service in services {
        let single_route = service.config().single_route.clone();
        let batch_route = service.config().batch_route.clone();
        let routes = Router::new()
            .route(&single_route, post(handlers::predict_single))
            .route(&batch_route, post(handlers::predict_batch))
            .with_state(service);
        app = app.merge(routes);
    }

    app.layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}
