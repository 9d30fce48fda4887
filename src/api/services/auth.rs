//! Registration, login, and session verification.

use std::sync::Arc;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder, Result as ActixResult};
use tracing::{error, info, warn};

use crate::api::helpers::{error_from_portfolio, error_response, ok_json};
use crate::api::jwt::JwtService;
use crate::api::types::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserResponse,
};
use crate::storage::models::NewUser;
use crate::storage::SeaOrmStorage;
use crate::utils::password::{hash_password, verify_password};

pub const SESSION_COOKIE: &str = "portfolio_session";

/// Register a new dashboard account. Missing fields and duplicate emails
/// are both 400; the dashboard form surfaces the message as-is.
pub async fn register(
    payload: web::Json<RegisterRequest>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    let payload = payload.into_inner();

    let (name, email, password) = match (
        payload.name.filter(|s| !s.is_empty()),
        payload.email.filter(|s| !s.is_empty()),
        payload.password.filter(|s| !s.is_empty()),
    ) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "Name, email and password are required",
            ));
        }
    };

    match storage.find_user_by_email(&email).await {
        Ok(Some(_)) => {
            warn!("API: registration rejected, email already exists: {}", email);
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                "User already exists",
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!("API: registration lookup failed: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    }

    let hashed = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("API: password hashing failed: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    match storage
        .insert_user(NewUser {
            name,
            email,
            password: hashed,
        })
        .await
    {
        Ok(user) => {
            info!("API: user registered: {}", user.email);
            Ok(ok_json(&RegisterResponse {
                message: "Registration successful".to_string(),
                user: UserResponse::from(user),
            }))
        }
        Err(e) => {
            error!("API: registration insert failed: {}", e);
            Ok(error_from_portfolio(&e))
        }
    }
}

/// Exchange credentials for a session token. The token is returned in the
/// body and also set as an HttpOnly cookie for the dashboard.
pub async fn login(
    payload: web::Json<LoginRequest>,
    storage: web::Data<Arc<SeaOrmStorage>>,
    jwt: web::Data<Arc<JwtService>>,
) -> ActixResult<impl Responder> {
    let user = match storage.find_user_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("API: login failed, unknown email: {}", payload.email);
            return Ok(error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid email or password",
            ));
        }
        Err(e) => {
            error!("API: login lookup failed: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    };

    match verify_password(&payload.password, &user.password) {
        Ok(true) => {}
        Ok(false) => {
            warn!("API: login failed, bad password for: {}", payload.email);
            return Ok(error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid email or password",
            ));
        }
        Err(e) => {
            error!("API: password verification failed: {}", e);
            return Ok(error_from_portfolio(&e));
        }
    }

    let token = match jwt.generate_session_token(&user.id, &user.email, &user.name) {
        Ok(token) => token,
        Err(e) => {
            error!("API: token generation failed: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create session",
            ));
        }
    };

    info!("API: login successful: {}", user.email);

    let cookie = Cookie::build(SESSION_COOKIE, token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Validate the session presented via `Authorization: Bearer` or the
/// session cookie. Used by the dashboard to gate its pages.
pub async fn verify(req: HttpRequest, jwt: web::Data<Arc<JwtService>>) -> ActixResult<impl Responder> {
    let token = bearer_token(&req).or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
    });

    let Some(token) = token else {
        return Ok(error_response(StatusCode::UNAUTHORIZED, "Missing session"));
    };

    match jwt.validate_session_token(&token) {
        Ok(claims) => Ok(ok_json(&UserResponse {
            id: claims.uid,
            name: claims.name,
            email: claims.sub,
        })),
        Err(_) => Ok(error_response(
            StatusCode::UNAUTHORIZED,
            "Invalid or expired session",
        )),
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
