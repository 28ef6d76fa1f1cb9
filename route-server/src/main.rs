use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use route_server::cache::QueryCache;
use route_server::config::{IngestConfig, ServerConfig, StoreConfig};
use route_server::logging::init_logger;
use route_server::store::TimetableStore;
use route_server::web::{AppState, create_router};

#[derive(Parser)]
#[command(name = "route-server")]
#[command(about = "Train route queries over a railway timetable")]
struct Args {
    /// Load the timetable CSV into the store before serving
    #[arg(long)]
    insert: bool,

    /// Timetable CSV to load with --insert
    #[arg(long, env = "TIMETABLE_CSV", default_value = "Indian_railway1.csv")]
    csv: PathBuf,

    /// Treat the first CSV row as data rather than a header
    #[arg(long, env = "TIMETABLE_NO_HEADERS")]
    no_headers: bool,

    /// JSON snapshot file the timetable is persisted to
    #[arg(long, env = "TIMETABLE_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "ROUTE_SERVER_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Directory served under /static
    #[arg(long, env = "ROUTE_SERVER_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// Rows inserted concurrently during ingestion
    #[arg(long, env = "ROUTE_SERVER_MAX_CONCURRENT", default_value = "20")]
    max_concurrent: usize,

    /// Stop records per /fetch page
    #[arg(long, env = "ROUTE_SERVER_PAGE_SIZE", default_value = "15")]
    page_size: usize,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let mut store = StoreConfig::in_memory().with_page_size(self.page_size);
        if let Some(path) = self.snapshot {
            store = store.with_snapshot_path(path);
        }

        ServerConfig {
            bind_addr: self.addr,
            static_dir: self.static_dir,
            insert_on_start: self.insert,
            store,
            ingest: IngestConfig::new(self.csv)
                .with_headers(!self.no_headers)
                .with_max_concurrent(self.max_concurrent),
            ..ServerConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger();

    let config = Args::parse().into_config();
    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let store = match TimetableStore::open(&config.store) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "failed to open timetable store");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(store, QueryCache::new(&config.cache));

    if config.insert_on_start {
        match state.ingest(&config.ingest).await {
            Ok(rows) => info!(rows, "timetable inserted"),
            Err(e) => {
                error!(error = %e, "timetable ingestion failed");
                return ExitCode::FAILURE;
            }
        }
    } else {
        info!("not inserted");
    }

    info!(records = state.store.len().await, "timetable ready");

    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    let addr = config.bind_addr;
    info!("Route server listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /health              - Health check");
    info!("  GET  /fetch?page=N        - Page through stop records");
    info!("  GET  /search?tNo&aTime&dTime&sName - Search stop records");
    info!("  GET  /searchDist?sName&dName - Nearest/farthest trains");
    info!("  GET  /sortDist?sName&dName   - Trains by travel time");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    info!("shut down");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> ServerConfig {
        let argv = std::iter::once("route-server").chain(args.iter().copied());
        Args::try_parse_from(argv).unwrap().into_config()
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert!(!config.insert_on_start);
        assert!(config.ingest.has_headers);
        assert_eq!(config.ingest.max_concurrent, 20);
        assert_eq!(config.store.page_size, 15);
        assert!(config.store.snapshot_path.is_none());
    }

    #[test]
    fn no_headers_flag_reads_first_row_as_data() {
        let config = config(&["--insert", "--no-headers", "--csv", "rows.csv"]);
        assert!(config.insert_on_start);
        assert!(!config.ingest.has_headers);
        assert_eq!(config.ingest.csv_path, PathBuf::from("rows.csv"));
    }

    #[test]
    fn tuning_flags() {
        let config = config(&["--max-concurrent", "4", "--page-size", "50"]);
        assert_eq!(config.ingest.max_concurrent, 4);
        assert_eq!(config.store.page_size, 50);
        assert!(config.validate().is_ok());
    }
}
