use anyhow::Result;
use cityfinder_core::CityIndex;
use cityfinder_server::build_app;
use cityfinder_server::citylist::{CityListCache, CITY_LIST_URL};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Cache directory holding the downloaded city list and the built index
    #[arg(long, default_value = "./cache")]
    cache_dir: PathBuf,
    /// Force a full index rebuild even if one exists
    #[arg(long, default_value_t = false)]
    rebuild: bool,
    /// URL of the bulk city list
    #[arg(long, default_value = CITY_LIST_URL)]
    city_list_url: String,
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

    let index = CityIndex::new(args.cache_dir.join("index"));
    if args.rebuild || !index.exists() {
        tracing::info!("city index not present, rebuilding");
        let cache = CityListCache::new(args.cache_dir.join("citylist"));
        cache.ensure_cached(&args.city_list_url).await?;
        let cities = cache.load_cities()?;
        index.build(cities.into_iter().map(Ok))?;
    }
    let conn = index.open()?;
    tracing::info!(num_cities = conn.num_cities(), "city index opened");

    let app = build_app(Arc::new(conn));
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
