//! HTTP validation server.
//!
//! Stateless: each request carries the word and the guess. Cross-origin
//! requests are accepted from any origin.

use crate::protocol::{HealthResponse, VALIDATE_PATH, ValidateRequest, ValidateResponse};
use axum::{
    Json, Router,
    body::Body,
    extract::rejection::JsonRejection,
    http::{HeaderValue, Request, Response, StatusCode, header},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument, warn};

/// Builds the router: `POST /api/validate`, its preflight, and `GET /health`.
pub fn router() -> Router {
    Router::new()
        .route(VALIDATE_PATH, post(validate_guess).options(preflight))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .map_request(|req: Request<Body>| {
                    debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                    req
                })
                .map_response(allow_any_origin),
        )
}

fn allow_any_origin(mut response: Response<Body>) -> Response<Body> {
    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Handles one validation request.
///
/// Bodies that do not parse as a [`ValidateRequest`] get the same failure
/// shape as requests with missing fields.
#[instrument(skip_all)]
async fn validate_guess(
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> (StatusCode, Json<ValidateResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Malformed validation request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ValidateResponse::failure(rejection.body_text())),
            );
        }
    };

    match request.validate() {
        Ok(matches) => {
            debug!(hits = matches.len(), "Validated guess");
            (StatusCode::OK, Json(ValidateResponse::success(matches)))
        }
        Err(e) => {
            warn!(error = %e, "Invalid validation request");
            (StatusCode::BAD_REQUEST, Json(ValidateResponse::failure(e)))
        }
    }
}

/// Binds `host:port`. The host may be a name such as `localhost` or a bare
/// IPv6 address.
#[instrument]
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

/// Binds `host:port` and serves until the process exits.
pub async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    let listener = bind(host, port).await?;
    serve_on(listener).await
}

/// Serves on an already-bound listener.
pub async fn serve_on(listener: TcpListener) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("Hangman server running at http://{}", addr);
    axum::serve(listener, router()).await?;
    Ok(())
}
