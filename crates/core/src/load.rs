use axum::http::{HeaderMap, HeaderValue, header};

/// Value sent in the `Cache-Control` header of the page.
pub const CACHE_CONTROL_VALUE: &str = "no-store, must-revalidate";
/// Value sent in the `Pragma` header of the page, for HTTP/1.0 caches.
pub const PRAGMA_VALUE: &str = "no-cache";
/// Value sent in the `Expires` header of the page.
pub const EXPIRES_VALUE: &str = "0";

/// The capability a load hook is given to register headers for the outgoing response.
pub trait SetHeaders {
    /// Error returned when the headers cannot be registered.
    type Error;

    /// Record `headers` so they are included in the response once the page is rendered.
    fn set_headers(&mut self, headers: HeaderMap) -> Result<(), Self::Error>;
}

/// Build the headers that stop clients and intermediaries from caching the page.
pub fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_VALUE),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static(PRAGMA_VALUE));
    headers.insert(header::EXPIRES, HeaderValue::from_static(EXPIRES_VALUE));
    headers
}

/// Load hook for the page, ran once per request before the response is finalized.
///
/// The page has no data of its own, so the only thing this does is register
/// [`no_cache_headers`]. Any error comes from the capability and is returned untouched.
pub fn load<E: SetHeaders + ?Sized>(event: &mut E) -> Result<(), E::Error> {
    event.set_headers(no_cache_headers())
}
