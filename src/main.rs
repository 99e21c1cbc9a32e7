use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shortlink::config::Config;
use shortlink::services::{ApiService, RandomCodeSource, RedirectService, ShortLinkRegistry};
use shortlink::storages::StorageFactory;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let storage = StorageFactory::create(&config.storage_backend).map_err(std::io::Error::other)?;
    info!("Using storage backend: {}", storage.backend_name());

    let registry = Arc::new(ShortLinkRegistry::new(storage, Arc::new(RandomCodeSource)));

    let bind_address = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(
                web::scope("/api/v1")
                    .route("/shorten", web::post().to(ApiService::shorten))
                    .route("/update", web::post().to(ApiService::update_target))
                    .route("/update-expiry", web::post().to(ApiService::extend_expiry)),
            )
            .route("/{path:.*}", web::get().to(RedirectService::handle_redirect))
            .route("/{path:.*}", web::head().to(RedirectService::handle_redirect))
    })
    .bind(bind_address)?
    .run()
    .await
}
