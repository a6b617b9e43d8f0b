pub mod tcp;

use async_trait::async_trait;

use parley_core::ServerLine;

/// Outbound write endpoint for one participant's connection.
#[async_trait]
pub trait LineSink: Send {
    async fn send_line(&mut self, line: &ServerLine) -> anyhow::Result<()>;
}
