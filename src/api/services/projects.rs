//! Project CRUD endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, Responder, Result as ActixResult};
use tracing::{error, info};

use crate::api::helpers::{created_json, error_from_portfolio, error_response, not_found, ok_json};
use crate::api::types::{ListQuery, MessageResponse, ProjectPayload};
use crate::storage::models::{ProjectSort, SortOrder};
use crate::storage::SeaOrmStorage;

/// List all projects, in creation order unless a sort is requested.
pub async fn get_all_projects(
    query: web::Query<ListQuery>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    let sort = match query.sort.as_deref().map(str::parse::<ProjectSort>) {
        Some(Ok(sort)) => sort,
        Some(Err(msg)) => return Ok(error_response(StatusCode::BAD_REQUEST, msg)),
        None => ProjectSort::default(),
    };
    let order = match query.order.as_deref().map(str::parse::<SortOrder>) {
        Some(Ok(order)) => order,
        Some(Err(msg)) => return Ok(error_response(StatusCode::BAD_REQUEST, msg)),
        // Creation order reads oldest-first by default
        None if sort == ProjectSort::CreatedAt => SortOrder::Asc,
        None => SortOrder::default(),
    };

    match storage.list_projects(sort, order).await {
        Ok(projects) => Ok(ok_json(&projects)),
        Err(e) => {
            error!("API: failed to list projects: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

pub async fn post_project(
    payload: web::Json<ProjectPayload>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    info!("API: create project request (name: {})", payload.name);

    match storage.insert_project(payload.into_inner().into()).await {
        Ok(project) => Ok(created_json(&project)),
        Err(e) => {
            error!("API: failed to create project: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

pub async fn get_project(
    id: web::Path<String>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    match storage.get_project(&id).await {
        Ok(Some(project)) => Ok(ok_json(&project)),
        Ok(None) => Ok(not_found()),
        Err(e) => {
            error!("API: failed to fetch project {}: {}", id, e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// Full replace, not a patch.
pub async fn update_project(
    id: web::Path<String>,
    payload: web::Json<ProjectPayload>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    match storage
        .replace_project(&id, payload.into_inner().into())
        .await
    {
        Ok(Some(project)) => Ok(ok_json(&project)),
        Ok(None) => Ok(not_found()),
        Err(e) => {
            error!("API: failed to update project {}: {}", id, e);
            Ok(error_from_portfolio(&e))
        }
    }
}

pub async fn delete_project(
    id: web::Path<String>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    match storage.delete_project(&id).await {
        Ok(true) => Ok(ok_json(&MessageResponse {
            message: "Project deleted".to_string(),
        })),
        Ok(false) => Ok(not_found()),
        Err(e) => {
            error!("API: failed to delete project {}: {}", id, e);
            Ok(error_from_portfolio(&e))
        }
    }
}
