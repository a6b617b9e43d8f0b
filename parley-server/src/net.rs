pub mod connection;
pub mod output;
pub mod sink;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::state::registry::Registry;

/// Accept loop: one task per inbound connection, running the session state
/// machine to completion.
pub async fn serve(listener: TcpListener, registry: Arc<Registry>) -> anyhow::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::info!(%peer, "client connected");
                let registry = registry.clone();
                tokio::spawn(async move {
                    if let Err(e) = connection::handle_connection(stream, registry).await {
                        tracing::error!(%peer, error = %e, "connection error");
                    }
                    tracing::info!(%peer, "client disconnected");
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to accept connection");
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            }
        }
    }
}
