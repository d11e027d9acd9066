use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::UserStore;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    pub database: String,
}

/// GET /health
pub async fn health_check(store: web::Data<dyn UserStore>) -> impl Responder {
    let (status, database) = match store.health_check().await {
        Ok(()) => ("healthy", "up"),
        Err(e) => {
            log::error!("❌ Health check failed: {}", e);
            ("degraded", "down")
        }
    };

    let body = HealthResponse {
        status: status.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        database: database.to_string(),
    };

    if database == "up" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
