//! Response builders shared by the API handlers.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

use crate::errors::PortfolioError;

use super::types::ErrorResponse;

pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

pub fn ok_json<T: Serialize>(body: &T) -> HttpResponse {
    json_response(StatusCode::OK, body)
}

pub fn created_json<T: Serialize>(body: &T) -> HttpResponse {
    json_response(StatusCode::CREATED, body)
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    json_response(
        status,
        &ErrorResponse {
            error: message.into(),
        },
    )
}

pub fn not_found() -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Maps a `PortfolioError` to its HTTP status and `{"error": ...}` body.
pub fn error_from_portfolio(err: &PortfolioError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}
