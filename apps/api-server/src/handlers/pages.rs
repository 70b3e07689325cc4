//! Static pages: about and health.

use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct AboutResponse {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
}

/// GET /about
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(AboutResponse {
        name: "Quill",
        description: "A small blog: posts, comments, and a contact form.",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - returns server status.
///
/// GET /health
pub async fn health() -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}
