//! Crate for Nocache, a page server that keeps browsers and proxies from caching its page.
//!
//! The page's [`load()`] hook runs once per request and registers `Cache-Control`,
//! `Pragma` and `Expires` headers through the [`SetHeaders`] capability of the
//! request's [`LoadEvent`].

mod event;
mod load;
mod middleware;
mod routes;

pub use event::{LoadEvent, SetHeadersError};
pub use load::{
    CACHE_CONTROL_VALUE, EXPIRES_VALUE, PRAGMA_VALUE, SetHeaders, load, no_cache_headers,
};

use anyhow::Result;
use axum::{
    Router, ServiceExt, extract::Request, http::StatusCode, middleware as axum_middleware,
    routing::get,
};
use core::{future, net::SocketAddr, time::Duration};
use routes::{HEALTH_ENDPOINT, PAGE_ENDPOINT};
use tokio::{net::TcpListener, signal};
use tower_http::{
    catch_panic::CatchPanicLayer,
    normalize_path::NormalizePath,
    timeout::TimeoutLayer,
    trace::{self, TraceLayer},
};
use tracing::{Level, info, warn};

/// # Example
/// ```rust,no_run
/// use std::net::{SocketAddr, IpAddr, Ipv4Addr};
/// use nocache::{NocacheServer, NocacheServerSettings};
///
/// # #[tokio::main]
/// # async fn main() {
/// let server = NocacheServer::new(NocacheServerSettings::default()).unwrap();
/// server.start(&SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 3500)).await.unwrap();
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NocacheServer {
    router_inner: Router,
}

/// Settings to run the Nocache server with.
#[derive(Debug, Clone)]
pub struct NocacheServerSettings {
    /// How long a request may take to be processed before it is abandoned
    /// and an error is sent to the client.
    pub request_timeout: Duration,
}

impl Default for NocacheServerSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
        }
    }
}

impl NocacheServer {
    /// Create a new server with the provided settings.
    pub fn new(settings: NocacheServerSettings) -> Result<Self> {
        let router = Router::new()
            .route(PAGE_ENDPOINT, get(routes::page_handler))
            .route(HEALTH_ENDPOINT, get(routes::health_handler))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                settings.request_timeout,
            ))
            .layer(CatchPanicLayer::new())
            .layer(axum_middleware::from_fn(
                middleware::server_header_middleware,
            ));

        Ok(Self {
            router_inner: router,
        })
    }

    /// The service answering every request to this server.
    ///
    /// Trailing slashes are trimmed before routing, so `/health/` reaches `/health`.
    pub fn service(&self) -> NormalizePath<Router> {
        NormalizePath::trim_trailing_slash(self.router_inner.clone())
    }

    /// Start the server and expose it locally on the provided [`SocketAddr`].
    pub async fn start(self, address: &SocketAddr) -> Result<()> {
        let tcp_listener = TcpListener::bind(&address).await?;
        info!("Listening on http://{}", tcp_listener.local_addr()?);
        axum::serve(
            tcp_listener,
            ServiceExt::<Request>::into_make_service(self.service()),
        )
        .with_graceful_shutdown(Self::shutdown_signal())
        .await?;
        Ok(())
    }

    /// Resolves once the process is asked to stop, letting in-flight page loads finish.
    async fn shutdown_signal() {
        let interrupt = async {
            if let Err(err) = signal::ctrl_c().await {
                warn!("Unable to listen for Ctrl+C: {err}");
                future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    warn!("Unable to listen for SIGTERM: {err}");
                    future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = future::pending::<()>();

        tokio::select! {
            () = interrupt => info!("Received Ctrl+C, shutting down"),
            () = terminate => info!("Received SIGTERM, shutting down"),
        }
    }
}
