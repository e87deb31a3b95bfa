//! Roster web service entry point
//!
//! Serves the roster over HTTP against the remote table store configured in
//! the environment, or against a process-local store with `--in-memory`.

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::signal;

use roster::{InMemoryTableStore, RestTableStore, RosterStore, TableStore};
use shared::{Component, StoreConfig, component_info, component_warn, logging};
use webserver::{WebServer, WebServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Student roster web service")]
struct Args {
    /// Port for HTTP server (browser connections)
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Use a process-local table store instead of the remote one
    #[arg(long)]
    in_memory: bool,

    /// Seed the in-memory store with sample students
    #[arg(long)]
    seed_demo: bool,

    /// Skip loading students at startup
    #[arg(long)]
    no_initial_fetch: bool,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));

    let address = SocketAddr::new(args.bind, args.port);
    let initial_fetch = !args.no_initial_fetch;

    if args.in_memory {
        let store = if args.seed_demo {
            InMemoryTableStore::demo()
        } else {
            InMemoryTableStore::new()
        };
        component_info!(Component::WebServer, "🔧 Starting with in-memory store (seeded: {})", args.seed_demo);
        return serve(store, address, initial_fetch).await;
    }

    if args.seed_demo {
        component_warn!(Component::WebServer, "⚠️ --seed-demo only applies with --in-memory; ignoring");
    }

    let config = StoreConfig::from_env().inspect_err(|e| {
        logging::log_error(Component::WebServer, "Loading store configuration", e);
    })?;
    component_info!(Component::WebServer, "🔗 Using remote store at {}", config.base_url);

    let store = RestTableStore::new(&config)?;
    serve(store, address, initial_fetch).await
}

async fn serve<S>(store: S, address: SocketAddr, initial_fetch: bool) -> WebServerResult<()>
where
    S: TableStore + 'static,
{
    logging::log_startup(Component::WebServer, &format!("roster web service on {address}"));

    let roster = Arc::new(RosterStore::new(store));
    if initial_fetch {
        roster.fetch_students().await;
    }

    let mut webserver = WebServer::new(roster);

    // Set up graceful shutdown
    let shutdown_sender = webserver.get_shutdown_sender();
    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => {
                logging::log_shutdown(Component::WebServer, "Received Ctrl+C signal");
                let _ = shutdown_sender.send(()).await;
            }
            Err(err) => {
                logging::log_error(Component::WebServer, "Signal handling", &err);
            }
        }
    });

    webserver.run(address).await?;

    logging::log_success(Component::WebServer, "WebServer stopped gracefully");
    Ok(())
}
