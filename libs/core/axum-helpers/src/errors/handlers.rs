use std::any::Any;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// Use as the fallback handler in your router.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::from_code(ErrorCode::NotFound));
    (StatusCode::NOT_FOUND, body).into_response()
}

/// Last-resort boundary for panics escaping a handler.
///
/// Wired through `tower_http::catch_panic::CatchPanicLayer::custom` in
/// `create_router`. Logs the panic payload at error severity and converts it
/// into a generic internal-failure response; expected error kinds never reach
/// this path.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };

    tracing::error!(
        error_code = ErrorCode::InternalError.code(),
        "Unhandled panic in request handler: {}",
        detail
    );

    let body = Json(ErrorResponse::from_code(ErrorCode::InternalError));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
