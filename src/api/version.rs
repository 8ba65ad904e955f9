//! API version resolution.
//!
//! [`resolve_version`] runs as a route layer on the versioned routers. It
//! reads the matched route template (`/api/{version}/...`), takes its version
//! segment, and attaches a [`RequestContext`] to the request. Handlers pass
//! that context explicitly to the view layer.

use std::fmt;
use std::str::FromStr;

use axum::extract::{MatchedPath, Request};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Wire representation family served for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// Canonical entities.
    V1,
    /// Entities with embedded seller references and hypermedia links.
    V2,
}

impl FromStr for ApiVersion {
    type Err = ApiError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            other => Err(ApiError::InvalidVersion(other.to_string())),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

/// Per-request metadata resolved before the handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Raw version token taken from the route (e.g. `"v1"`).
    pub version: String,
    /// Value of the `Host` header, used to build hypermedia links.
    pub host: String,
}

impl RequestContext {
    /// Creates a context for the given version token and host.
    #[must_use]
    pub fn new(version: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            host: host.into(),
        }
    }

    /// Parses the version token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidVersion`] for a token with no view.
    pub fn api_version(&self) -> Result<ApiVersion, ApiError> {
        self.version.parse()
    }
}

/// Returns the version segment of a route template.
///
/// `/api/v1/products` splits into `["", "api", "v1", "products"]`; the
/// segment at index 2 is the version. Templates with fewer than three
/// components, or an empty version segment, have none.
#[must_use]
pub fn version_segment(route: &str) -> Option<&str> {
    route.split('/').nth(2).filter(|segment| !segment.is_empty())
}

/// Middleware attaching a [`RequestContext`] to versioned requests.
///
/// Responds `404 {"error": "invalid path requested"}` without running the
/// handler when the matched route carries no version segment.
pub async fn resolve_version(mut request: Request, next: Next) -> Response {
    let version = request
        .extensions()
        .get::<MatchedPath>()
        .and_then(|path| version_segment(path.as_str()))
        .map(str::to_owned);

    let Some(version) = version else {
        tracing::debug!(path = %request.uri().path(), "no API version in route");
        return ApiError::RouteNotFound.into_response();
    };

    let host = request_host(&request);
    request
        .extensions_mut()
        .insert(RequestContext::new(version, host));

    next.run(request).await
}

fn request_host(request: &Request) -> String {
    request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or_else(|| request.uri().authority().map(|a| a.as_str().to_owned()))
        .unwrap_or_default()
}
