use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use nocache::{NocacheServer, NocacheServerSettings};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about)]
struct AppOptions {
    /// Internet socket address that the server should be ran on.
    #[arg(
        long = "address",
        env = "NOCACHE_ADDRESS",
        default_value = "127.0.0.1:3500"
    )]
    address: SocketAddr,

    /// Maximum waiting time before an incoming request is aborted.
    #[arg(
        long = "request-timeout",
        env = "NOCACHE_REQUEST_TIMEOUT",
        default_value = "15s"
    )]
    request_timeout: humantime::Duration,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info")))
        .with_thread_ids(true)
        .init();
    let args = AppOptions::parse();

    NocacheServer::new(NocacheServerSettings {
        request_timeout: *args.request_timeout,
    })?
    .start(&args.address)
    .await
}
