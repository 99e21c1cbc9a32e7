use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::debug;

use crate::errors::ShortlinkError;
use crate::services::registry::ShortLinkRegistry;

static DEFAULT_REDIRECT_URL: Lazy<String> =
    Lazy::new(|| std::env::var("DEFAULT_URL").unwrap_or_else(|_| "https://example.com".to_string()));

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        registry: web::Data<Arc<ShortLinkRegistry>>,
    ) -> impl Responder {
        let code = path.into_inner();

        if code.is_empty() {
            return HttpResponse::TemporaryRedirect()
                .insert_header(("Location", DEFAULT_REDIRECT_URL.as_str()))
                .finish();
        }

        match registry.resolve(&code).await {
            Ok(target) => HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                .insert_header(("Location", target))
                .finish(),
            Err(ShortlinkError::NotFound(_)) => {
                debug!("Redirect link not found: {}", code);
                HttpResponse::build(StatusCode::NOT_FOUND)
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .insert_header(("Cache-Control", "public, max-age=60")) // 缓存404
                    .body("Not Found")
            }
            Err(e) => HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                .body(format!("[{}] {}", e.code(), e)),
        }
    }
}
