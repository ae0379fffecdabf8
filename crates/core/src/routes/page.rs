use super::ErrorResponse;
use crate::{event::LoadEvent, load};
use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tracing::{debug, error};

pub const PAGE_ENDPOINT: &str = "/";

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Nocache</title>
</head>
<body>
<p>This page is rendered fresh on every load.</p>
</body>
</html>
"#;

pub async fn page_handler(uri: Uri) -> Response {
    render(LoadEvent::new(uri))
}

/// Run the load hook against `event` and build the page response from what it registered.
fn render(mut event: LoadEvent) -> Response {
    if let Err(err) = load::load(&mut event) {
        error!("Page load hook failed for {}: {err}", event.url());
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                message: "Something went wrong whilst loading the page.",
            }),
        )
            .into_response();
    }
    debug!(
        "Applying {} load headers to {}",
        event.headers().len(),
        event.url()
    );

    let mut response = Html(PAGE_HTML).into_response();
    event.apply_to(&mut response);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::SetHeaders;
    use axum::{
        body::to_bytes,
        http::{HeaderMap, HeaderValue, header},
    };

    #[tokio::test]
    async fn renders_page_with_load_headers() {
        let response = render(LoadEvent::new(Uri::from_static("/")));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::PRAGMA], "no-cache");

        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        assert_eq!(&body[..], PAGE_HTML.as_bytes());
    }

    #[tokio::test]
    async fn failed_load_is_internal_error() {
        let mut event = LoadEvent::new(Uri::from_static("/"));
        let mut pragma = HeaderMap::new();
        pragma.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
        event.set_headers(pragma).unwrap();

        let response = render(event);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(
            &body[..],
            br#"{"message":"Something went wrong whilst loading the page."}"#
        );
    }
}
