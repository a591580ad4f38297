use anyhow::Result;
use axum::Router;
use clap::Parser;
use server::build_app;
use server::config::Config;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Destination dataset (JSON array or JSONL)
    #[arg(long, default_value = "./data/destinations.json")]
    destinations: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = Config::from_env()?;
    let app: Router = build_app(&config, &args.destinations)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, upstream = %config.upstream_url, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
