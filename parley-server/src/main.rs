use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use parley_server::Registry;
use parley_server::config::Config;
use parley_server::net;

/// Group chat relay: accepts connections, assigns each a unique name and
/// rebroadcasts every chat line to all participants.
#[derive(Debug, Parser)]
#[command(name = "parley-server")]
struct Cli {
    /// Port to listen on.
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let cfg = Config::from_port(cli.port);

    let listener = TcpListener::bind(cfg.listen_addr).await?;
    tracing::info!(addr = %cfg.listen_addr, "parley server listening");

    let registry = Arc::new(Registry::new());
    net::serve(listener, registry).await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, prelude::*};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,parley_server=debug"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
