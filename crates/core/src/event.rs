use crate::load::SetHeaders;
use axum::{
    http::{HeaderMap, HeaderName, Uri, header},
    response::Response,
};
use thiserror::Error;

/// Errors returned by [`LoadEvent::set_headers`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetHeadersError {
    /// The header was already registered earlier in the same load.
    #[error("{0} header is already set")]
    AlreadySet(HeaderName),

    /// Cookies can't be registered as plain headers.
    #[error("set-cookie can not be registered through set_headers")]
    SetCookie,
}

/// Per-request context handed to a page's load hook.
#[derive(Debug)]
pub struct LoadEvent {
    url: Uri,
    headers: HeaderMap,
}

impl LoadEvent {
    /// Create an event for a request to `url` with no headers registered yet.
    pub fn new(url: Uri) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
        }
    }

    /// The URI of the request being loaded.
    pub fn url(&self) -> &Uri {
        &self.url
    }

    /// Headers registered so far.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Consume the event, returning every registered header.
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }

    /// Copy the registered headers onto `response`, replacing any header of the same name.
    pub fn apply_to(self, response: &mut Response) {
        let target = response.headers_mut();
        let mut current: Option<HeaderName> = None;
        // Only the first value of each header carries its name.
        for (name, value) in self.headers {
            match name {
                Some(name) => {
                    target.insert(&name, value);
                    current = Some(name);
                }
                None => {
                    if let Some(name) = &current {
                        target.append(name, value);
                    }
                }
            }
        }
    }
}

impl SetHeaders for LoadEvent {
    type Error = SetHeadersError;

    fn set_headers(&mut self, headers: HeaderMap) -> Result<(), Self::Error> {
        for name in headers.keys() {
            if *name == header::SET_COOKIE {
                return Err(SetHeadersError::SetCookie);
            }
            if self.headers.contains_key(name) {
                return Err(SetHeadersError::AlreadySet(name.clone()));
            }
        }
        self.headers.extend(headers);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::{self, no_cache_headers};
    use axum::http::HeaderValue;

    fn event() -> LoadEvent {
        LoadEvent::new(Uri::from_static("/"))
    }

    #[test]
    fn records_headers() {
        let mut event = event();
        event.set_headers(no_cache_headers()).unwrap();
        assert_eq!(event.url(), "/");
        assert_eq!(event.into_headers(), no_cache_headers());
    }

    #[test]
    fn rejects_header_set_twice() {
        let mut event = event();
        load::load(&mut event).unwrap();

        let mut again = HeaderMap::new();
        again.insert("pragma", HeaderValue::from_static("no-cache"));
        assert_eq!(
            event.set_headers(again),
            Err(SetHeadersError::AlreadySet(header::PRAGMA))
        );
    }

    #[test]
    fn rejects_set_cookie() {
        let mut event = event();
        let mut headers = HeaderMap::new();
        headers.insert(header::SET_COOKIE, HeaderValue::from_static("a=b"));
        assert_eq!(event.set_headers(headers), Err(SetHeadersError::SetCookie));
        assert!(event.headers().is_empty());
    }

    #[test]
    fn failed_call_records_nothing() {
        let mut event = event();
        let mut first = HeaderMap::new();
        first.insert(header::EXPIRES, HeaderValue::from_static("0"));
        event.set_headers(first).unwrap();

        assert_eq!(
            event.set_headers(no_cache_headers()),
            Err(SetHeadersError::AlreadySet(header::EXPIRES))
        );
        assert_eq!(event.headers().len(), 1);
        assert_eq!(event.headers()[header::EXPIRES], "0");
    }

    #[test]
    fn apply_overrides_existing_headers() {
        let mut event = event();
        load::load(&mut event).unwrap();

        let mut response = Response::new(axum::body::Body::empty());
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        );
        event.apply_to(&mut response);

        let headers = response.headers();
        assert_eq!(headers.get_all(header::CACHE_CONTROL).iter().count(), 1);
        assert_eq!(headers[header::CACHE_CONTROL], "no-store, must-revalidate");
        assert_eq!(headers[header::PRAGMA], "no-cache");
        assert_eq!(headers[header::EXPIRES], "0");
    }
}
