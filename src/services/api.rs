//! Management API
//!
//! Thin translation layer between HTTP and the registry: request parsing
//! and status codes live here, every semantic decision lives in the
//! registry.

use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::ShortlinkError;
use crate::services::registry::ShortLinkRegistry;

#[derive(Debug, Deserialize)]
pub struct UpdateQuery {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ExpiryQuery {
    pub code: String,
    pub days: i64,
}

pub struct ApiService;

impl ApiService {
    /// POST /api/v1/shorten — body is the percent-encoded URL
    pub async fn shorten(
        body: String,
        registry: web::Data<Arc<ShortLinkRegistry>>,
        config: web::Data<Config>,
    ) -> impl Responder {
        match registry.shorten(body.trim()).await {
            Ok(code) => {
                HttpResponse::Ok().body(format!("{}/{}", config.public_base_url, code))
            }
            Err(e) => Self::error_response(e),
        }
    }

    /// POST /api/v1/update?code=... — body is the new target URL
    pub async fn update_target(
        query: web::Query<UpdateQuery>,
        body: String,
        registry: web::Data<Arc<ShortLinkRegistry>>,
    ) -> impl Responder {
        match registry.update_target(&query.code, body.trim()).await {
            Ok(updated) => HttpResponse::Ok().json(updated),
            Err(e) => Self::error_response(e),
        }
    }

    /// POST /api/v1/update-expiry?code=...&days=...
    pub async fn extend_expiry(
        query: web::Query<ExpiryQuery>,
        registry: web::Data<Arc<ShortLinkRegistry>>,
    ) -> impl Responder {
        match registry.extend_expiry(&query.code, query.days).await {
            Ok(updated) => HttpResponse::Ok().json(updated),
            Err(e) => Self::error_response(e),
        }
    }

    fn error_response(err: ShortlinkError) -> HttpResponse {
        match err {
            ShortlinkError::Decode(_)
            | ShortlinkError::InvalidUrl(_)
            | ShortlinkError::Validation(_) => {
                HttpResponse::BadRequest().body(format!("[{}] {}", err.code(), err))
            }
            ShortlinkError::NotFound(_) => {
                HttpResponse::NotFound().body(format!("[{}] {}", err.code(), err))
            }
            _ => HttpResponse::InternalServerError().body(format!("[{}] {}", err.code(), err)),
        }
    }
}
