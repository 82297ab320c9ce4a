use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::info;

pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    let session = req
        .headers()
        .get("mcp-session-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    info!(
        "{} {} session={} -> {}",
        method,
        path,
        session,
        response.status()
    );
    response
}
