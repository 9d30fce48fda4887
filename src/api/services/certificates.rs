//! Certificate CRUD endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, Responder, Result as ActixResult};
use tracing::{error, info, trace};

use crate::api::helpers::{created_json, error_from_portfolio, error_response, not_found, ok_json};
use crate::api::types::{CertificatePayload, ListQuery, MessageResponse};
use crate::storage::models::{CertificateSort, SortOrder};
use crate::storage::SeaOrmStorage;

/// List all certificates. Defaults to `yearGet` descending, matching the
/// public timeline's newest-first display.
pub async fn get_all_certificates(
    query: web::Query<ListQuery>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    trace!("API: list certificates (sort: {:?})", query.sort);

    let sort = match query.sort.as_deref().map(str::parse::<CertificateSort>) {
        Some(Ok(sort)) => sort,
        Some(Err(msg)) => return Ok(error_response(StatusCode::BAD_REQUEST, msg)),
        None => CertificateSort::default(),
    };
    let order = match query.order.as_deref().map(str::parse::<SortOrder>) {
        Some(Ok(order)) => order,
        Some(Err(msg)) => return Ok(error_response(StatusCode::BAD_REQUEST, msg)),
        None => SortOrder::default(),
    };

    match storage.list_certificates(sort, order).await {
        Ok(certs) => Ok(ok_json(&certs)),
        Err(e) => {
            error!("API: failed to list certificates: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

pub async fn post_certificate(
    payload: web::Json<CertificatePayload>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    info!(
        "API: create certificate request (publisher: {})",
        payload.publisher
    );

    let data = match payload.into_inner().into_data() {
        Ok(data) => data,
        Err(e) => {
            error!("API: invalid certificate payload: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    match storage.insert_certificate(data).await {
        Ok(cert) => Ok(created_json(&cert)),
        Err(e) => {
            error!("API: failed to create certificate: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

pub async fn get_certificate(
    id: web::Path<String>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    match storage.get_certificate(&id).await {
        Ok(Some(cert)) => Ok(ok_json(&cert)),
        Ok(None) => Ok(not_found()),
        Err(e) => {
            error!("API: failed to fetch certificate {}: {}", id, e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// Full replace: every mutable field comes from the payload; nothing from
/// the stored record is preserved except id and creation time.
pub async fn update_certificate(
    id: web::Path<String>,
    payload: web::Json<CertificatePayload>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    let data = match payload.into_inner().into_data() {
        Ok(data) => data,
        Err(e) => {
            error!("API: invalid certificate payload: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    match storage.replace_certificate(&id, data).await {
        Ok(Some(cert)) => Ok(ok_json(&cert)),
        Ok(None) => Ok(not_found()),
        Err(e) => {
            error!("API: failed to update certificate {}: {}", id, e);
            Ok(error_from_portfolio(&e))
        }
    }
}

pub async fn delete_certificate(
    id: web::Path<String>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    match storage.delete_certificate(&id).await {
        Ok(true) => Ok(ok_json(&MessageResponse {
            message: "Certificate deleted".to_string(),
        })),
        Ok(false) => Ok(not_found()),
        Err(e) => {
            error!("API: failed to delete certificate {}: {}", id, e);
            Ok(error_from_portfolio(&e))
        }
    }
}
