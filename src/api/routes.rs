//! Route composition for the `/api` surface.
//!
//! Routes are split per collection so tests can mount a single scope.

use actix_web::web;

use super::services::auth::{login, register, verify};
use super::services::certificates::{
    delete_certificate, get_all_certificates, get_certificate, post_certificate,
    update_certificate,
};
use super::services::projects::{
    delete_project, get_all_projects, get_project, post_project, update_project,
};

/// Certificate routes `/certificates`
///
/// - GET  /certificates          - list (sortable)
/// - POST /certificates          - create
/// - GET/PUT/DELETE /certificates/{id}
pub fn certificates_routes() -> actix_web::Scope {
    web::scope("/certificates")
        .route("", web::get().to(get_all_certificates))
        .route("", web::post().to(post_certificate))
        .route("/{id}", web::get().to(get_certificate))
        .route("/{id}", web::put().to(update_certificate))
        .route("/{id}", web::delete().to(delete_certificate))
}

/// Project routes `/projects`, same shape as certificates.
pub fn projects_routes() -> actix_web::Scope {
    web::scope("/projects")
        .route("", web::get().to(get_all_projects))
        .route("", web::post().to(post_project))
        .route("/{id}", web::get().to(get_project))
        .route("/{id}", web::put().to(update_project))
        .route("/{id}", web::delete().to(delete_project))
}

/// Auth routes `/auth`
///
/// - POST /auth/register
/// - POST /auth/login
/// - GET  /auth/verify
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/verify", web::get().to(verify))
}

/// The full `/api` scope.
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(certificates_routes())
        .service(projects_routes())
        .service(auth_routes())
}
