use tokio::sync::mpsc;
use tracing::debug;

use parley_core::ServerLine;

use crate::net::sink::LineSink;

/// Bound on queued-but-unwritten lines per connection. A peer that stops
/// reading loses messages past this point instead of stalling the relay.
const OUTBOUND_QUEUE: usize = 64;

/// Cloneable sender half of one participant's outbound queue.
///
/// The session creates it and the registry keeps a clone for fan-out. The
/// socket itself stays with the writer task, so dropping a handle can never
/// close the connection.
#[derive(Debug, Clone)]
pub struct OutboundHandle {
    tx: mpsc::Sender<ServerLine>,
}

impl OutboundHandle {
    /// Best-effort enqueue. A full or closed queue drops the line.
    pub fn send(&self, line: ServerLine) {
        if let Err(e) = self.tx.try_send(line) {
            debug!(error = %e, "dropping outbound line");
        }
    }
}

/// Receiver half of the queue; drains it into a [`LineSink`] until every
/// sender is gone.
pub struct SessionOut {
    rx: mpsc::Receiver<ServerLine>,
}

impl SessionOut {
    /// Next queued line, or `None` once every sender has been dropped.
    pub async fn recv(&mut self) -> Option<ServerLine> {
        self.rx.recv().await
    }

    pub async fn run<S: LineSink>(mut self, mut sink: S) -> anyhow::Result<()> {
        while let Some(line) = self.recv().await {
            sink.send_line(&line).await?;
        }
        Ok(())
    }
}

/// Creates one connection's outbound queue.
pub fn outbound() -> (OutboundHandle, SessionOut) {
    let (tx, rx) = mpsc::channel(OUTBOUND_QUEUE);
    (OutboundHandle { tx }, SessionOut { rx })
}
