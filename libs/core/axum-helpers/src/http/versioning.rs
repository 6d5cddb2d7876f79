//! API version negotiation.
//!
//! Routes carry their major version in the path (`/api/v1/...`). Clients may
//! additionally pin a version through the `X-Api-Version` header; a request
//! naming a version this service does not serve is rejected before it reaches
//! a handler. Every response advertises the served versions.

use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const API_VERSION_HEADER: HeaderName = HeaderName::from_static("x-api-version");
pub const SUPPORTED_VERSIONS_HEADER: HeaderName =
    HeaderName::from_static("api-supported-versions");

/// Versions served by this process, in `major.minor` form.
#[derive(Debug, Clone, Copy)]
pub struct ApiVersions {
    pub supported: &'static [&'static str],
}

impl ApiVersions {
    pub const fn new(supported: &'static [&'static str]) -> Self {
        Self { supported }
    }

    /// Accepts `"1"` as shorthand for `"1.0"`.
    pub fn is_supported(&self, requested: &str) -> bool {
        let requested = requested.trim();
        let requested = requested.strip_prefix(['v', 'V']).unwrap_or(requested);
        self.supported.iter().any(|version| {
            *version == requested
                || version
                    .strip_suffix(".0")
                    .is_some_and(|major| major == requested)
        })
    }

    fn header_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.supported.join(", "))
            .unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}

impl Default for ApiVersions {
    fn default() -> Self {
        Self::new(&["1.0"])
    }
}

/// Middleware enforcing the `X-Api-Version` header.
///
/// ```ignore
/// let routes = Router::new()
///     .nest("/v1/products", products)
///     .layer(axum::middleware::from_fn_with_state(ApiVersions::default(), api_version));
/// ```
pub async fn api_version(
    State(versions): State<ApiVersions>,
    request: Request,
    next: Next,
) -> Response {
    let requested = request
        .headers()
        .get(&API_VERSION_HEADER)
        .map(|value| value.to_str().unwrap_or_default().to_string());

    let mut response = match requested {
        Some(version) if !versions.is_supported(&version) => {
            AppError::UnsupportedApiVersion(version).into_response()
        }
        _ => next.run(request).await,
    };

    response
        .headers_mut()
        .insert(SUPPORTED_VERSIONS_HEADER, versions.header_value());
    response
}
