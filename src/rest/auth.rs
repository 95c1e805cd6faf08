use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use super::{handlers::error_response, AppState};

/// Header carrying the shared secret.
pub const TOKEN_HEADER: &str = "token";

/// Reject requests whose `token` header is missing or differs from the configured secret.
pub async fn require_token(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let verdict = match req.headers().get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        None | Some("") => Err("API token required"),
        Some(token) if token != state.token.as_ref() => Err("invalid API token"),
        Some(_) => Ok(()),
    };

    match verdict {
        Ok(()) => next.run(req).await,
        Err(message) => {
            log::warn!("Rejected {} {}: {}", req.method(), req.uri().path(), message);
            error_response(StatusCode::UNAUTHORIZED, message)
        }
    }
}
