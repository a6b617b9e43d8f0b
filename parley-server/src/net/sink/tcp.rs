use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use parley_core::ServerLine;

use crate::net::sink::LineSink;

pub struct TcpLineSink<W> {
    writer: W,
}

impl<W> TcpLineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W> LineSink for TcpLineSink<W>
where
    W: AsyncWriteExt + Unpin + Send,
{
    async fn send_line(&mut self, line: &ServerLine) -> anyhow::Result<()> {
        // One write per line, so concurrent broadcasts never interleave
        // within a line on the wire.
        let mut buf = line.render();
        buf.push('\n');
        self.writer.write_all(buf.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
