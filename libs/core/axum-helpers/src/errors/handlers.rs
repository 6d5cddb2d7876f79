use axum::{
    Json,
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::any::Any;

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    let body = ErrorResponse::new(ErrorCode::NotFound, "The requested resource was not found");
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let body = ErrorResponse::new(
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message(),
    );
    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Builds a `CatchPanicLayer` response handler.
///
/// The panic is logged in full. The response body is a generic 500; when
/// `expose_details` is set (development) the panic message is added to `details`.
///
/// ```ignore
/// use tower_http::catch_panic::CatchPanicLayer;
///
/// let layer = CatchPanicLayer::custom(panic_handler(env.is_development()));
/// ```
pub fn panic_handler(
    expose_details: bool,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response<Body> + Clone + Send + Sync + 'static {
    move |payload: Box<dyn Any + Send + 'static>| {
        let message = panic_message(payload.as_ref());
        tracing::error!(
            error_code = ErrorCode::UnhandledPanic.code(),
            panic = %message,
            "An unhandled panic occurred while processing a request"
        );

        let mut body = ErrorResponse::new(
            ErrorCode::UnhandledPanic,
            ErrorCode::UnhandledPanic.default_message(),
        );
        if expose_details {
            body = body.with_details(serde_json::json!({ "panic": message }));
        }

        let json = serde_json::to_vec(&body).unwrap_or_default();
        Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .header(header::CONTENT_TYPE, "application/problem+json")
            .body(Body::from(json))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}
