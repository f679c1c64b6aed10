//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: access logging, route matching,
//! and dispatch to the user and file handlers.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use super::{static_files, users};
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};

const USERS_PATH: &str = "/api/users";
const USER_PREFIX: &str = "/api/users/";
const FILES_PREFIX: &str = "/files/";

/// Handler selected for a request
#[derive(Debug, PartialEq, Eq)]
pub enum Route<'a> {
    ListUsers,
    CreateUser,
    /// `None` when the path segment holds no number
    UpdateUser(Option<u64>),
    DeleteUser(Option<u64>),
    ServeFile(&'a str),
    NotFound,
}

/// Select the route for `method` and `path`, first match wins.
///
/// `path` must not include the query string.
pub fn match_route<'a>(method: &Method, path: &'a str) -> Route<'a> {
    match *method {
        Method::GET if path == USERS_PATH => Route::ListUsers,
        Method::POST if path == USERS_PATH => Route::CreateUser,
        Method::PUT if path.starts_with(USER_PREFIX) => Route::UpdateUser(user_id(path)),
        Method::DELETE if path.starts_with(USER_PREFIX) => Route::DeleteUser(user_id(path)),
        _ if path.starts_with(FILES_PREFIX) => {
            Route::ServeFile(path.split('/').nth(2).unwrap_or_default())
        }
        _ => Route::NotFound,
    }
}

/// Id from the fourth `/`-separated segment of `/api/users/{id}`
fn user_id(path: &str) -> Option<u64> {
    path.split('/').nth(3).and_then(parse_id_prefix)
}

/// Parse the leading ASCII digits of `segment`, so `"12abc"` is 12 and
/// `"abc"` has no id
fn parse_id_prefix(segment: &str) -> Option<u64> {
    let trimmed = segment.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    if state.config.logging.access_log {
        log_request(&req, peer_addr, &state.config.logging.access_log_format);
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match match_route(&method, &path) {
        Route::ListUsers => users::list_users(&state).await,
        Route::CreateUser => users::create_user(req, &state).await,
        Route::UpdateUser(id) => users::update_user(req, id, &state).await,
        Route::DeleteUser(id) => users::delete_user(id, &state).await,
        Route::ServeFile(filename) => static_files::serve_file(filename, &state.config.files).await,
        Route::NotFound => http::build_404_response(),
    };

    Ok(response)
}

fn log_request<B>(req: &Request<B>, peer_addr: SocketAddr, format: &str) {
    let uri = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);

    let mut entry = AccessLogEntry::new(peer_addr.to_string(), req.method().to_string(), uri);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();

    logger::log_access(&entry, format);
}
