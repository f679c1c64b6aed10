//! User CRUD handlers
//!
//! Each handler produces exactly one response. Create and update read the
//! body before touching the store, so a malformed payload never mutates it.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};

use super::body;
use crate::config::AppState;
use crate::http;
use crate::users::UserPayload;

/// GET /api/users
pub async fn list_users(state: &AppState) -> Response<Full<Bytes>> {
    let users = state.users.list().await;
    http::json_response(StatusCode::OK, &users)
}

/// POST /api/users
pub async fn create_user<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let payload: UserPayload = match body::parse_json(req, state.config.http.max_body_size).await {
        Ok(p) => p,
        Err(e) => return e.into_response(),
    };

    let user = state.users.create(payload).await;
    http::json_response(StatusCode::CREATED, &user)
}

/// PUT /api/users/{id}
pub async fn update_user<B>(
    req: Request<B>,
    id: Option<u64>,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let payload: UserPayload = match body::parse_json(req, state.config.http.max_body_size).await {
        Ok(p) => p,
        Err(e) => return e.into_response(),
    };

    let Some(id) = id else {
        return http::user_not_found();
    };

    match state.users.update(id, payload).await {
        Some(user) => http::json_response(StatusCode::OK, &user),
        None => http::user_not_found(),
    }
}

/// DELETE /api/users/{id}
pub async fn delete_user(id: Option<u64>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(id) = id else {
        return http::user_not_found();
    };

    match state.users.remove(id).await {
        Some(user) => http::json_response(StatusCode::OK, &user),
        None => http::user_not_found(),
    }
}
