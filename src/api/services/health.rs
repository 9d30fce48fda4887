//! Liveness endpoint for uptime monitors.

use std::sync::Arc;

use actix_web::{web, Responder, Result as ActixResult};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::api::helpers::ok_json;
use crate::storage::SeaOrmStorage;

#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub uptime_seconds: i64,
}

pub async fn health_check(
    storage: web::Data<Arc<SeaOrmStorage>>,
    app_start_time: web::Data<AppStartTime>,
) -> ActixResult<impl Responder> {
    trace!("Received health check request");

    let uptime = chrono::Utc::now() - app_start_time.start_datetime;

    Ok(ok_json(&HealthResponse {
        status: "ok".to_string(),
        backend: storage.backend_name().to_string(),
        uptime_seconds: uptime.num_seconds(),
    }))
}
