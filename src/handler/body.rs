//! Request body parsing module
//!
//! Reads a request payload up to a fixed limit and decodes it as JSON.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use serde::de::DeserializeOwned;
use std::fmt;

use crate::http;
use crate::logger;

/// Why a request body could not be turned into a value
#[derive(Debug)]
pub enum BodyError {
    /// Declared or actual size exceeds the configured maximum
    TooLarge { limit: u64 },
    /// The transport failed while reading
    Read(String),
    /// The bytes are not well-formed JSON, or decode to `null`
    InvalidJson(serde_json::Error),
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { limit } => write!(f, "request body exceeds {limit} bytes"),
            Self::Read(e) => write!(f, "failed to read request body: {e}"),
            Self::InvalidJson(e) => write!(f, "invalid JSON body: {e}"),
        }
    }
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidJson(e) => Some(e),
            _ => None,
        }
    }
}

impl BodyError {
    /// Response terminating the request for this error
    pub fn into_response(self) -> Response<Full<Bytes>> {
        match self {
            Self::TooLarge { .. } => http::build_413_response(),
            Self::Read(_) => http::build_400_response(),
            Self::InvalidJson(_) => http::invalid_json(),
        }
    }
}

/// Read the whole body of `req` and decode it as JSON into `T`.
///
/// A `Content-Length` above `max_body_size` is rejected before any bytes are
/// read; bodies without one are cut off once they pass the limit.
pub async fn parse_json<B, T>(req: Request<B>, max_body_size: u64) -> Result<T, BodyError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    T: DeserializeOwned,
{
    if let Some(size) = declared_length(&req) {
        if size > max_body_size {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            return Err(BodyError::TooLarge {
                limit: max_body_size,
            });
        }
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let bytes = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_warning(&format!(
                "Request body exceeded {max_body_size} bytes while reading"
            ));
            return Err(BodyError::TooLarge {
                limit: max_body_size,
            });
        }
        Err(e) => return Err(BodyError::Read(e.to_string())),
    };

    serde_json::from_slice(&bytes).map_err(BodyError::InvalidJson)
}

/// Parsed `Content-Length`, ignoring values that are not a plain number
fn declared_length<B>(req: &Request<B>) -> Option<u64> {
    let value = req.headers().get(hyper::header::CONTENT_LENGTH)?;
    match value.to_str().ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(size) => Some(size),
        None => {
            logger::log_warning("Invalid Content-Length value, skipping size check");
            None
        }
    }
}
