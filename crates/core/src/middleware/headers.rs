use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// Value of the `Server` header sent with every response.
pub const SERVER_HEADER_VALUE: &str = env!("CARGO_PKG_NAME");

/// Names this server in the `Server` header, replacing whatever a handler set.
pub async fn server_header_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::SERVER,
        HeaderValue::from_static(SERVER_HEADER_VALUE),
    );
    response
}
