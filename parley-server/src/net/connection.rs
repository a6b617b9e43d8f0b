use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tracing::debug;

use parley_core::{ServerLine, Username};

use crate::error::RegistryError;
use crate::net::output::{OutboundHandle, outbound};
use crate::net::sink::tcp::TcpLineSink;
use crate::state::registry::Registry;
use crate::state::session::{ConnState, Session};

/// Drives one connection through `AwaitingName -> Active -> Closed`.
///
/// The write half goes to a dedicated writer task draining the session's
/// outbound queue; this task keeps the read half and owns the session.
pub async fn handle_connection(stream: TcpStream, registry: Arc<Registry>) -> anyhow::Result<()> {
    let (r, w) = stream.into_split();
    let reader = BufReader::new(r);

    let (handle, session_out) = outbound();
    tokio::spawn(async move {
        if let Err(e) = session_out.run(TcpLineSink::new(w)).await {
            debug!(error = %e, "outbound writer stopped");
        }
    });

    let mut sess = Session::default();
    let result = read_loop(reader, &handle, &mut sess, &registry).await;

    // Closed: unregister exactly once, only if a name was ever accepted.
    if let Some(name) = sess.name.take() {
        registry.unregister(&name).await;
    }

    result
}

async fn read_loop(
    mut reader: BufReader<OwnedReadHalf>,
    handle: &OutboundHandle,
    sess: &mut Session,
    registry: &Registry,
) -> anyhow::Result<()> {
    handle.send(ServerLine::EnterName);

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Ok(()); // peer closed
        }
        let raw = line.trim();
        debug!(%raw, "received line");

        match sess.state {
            ConnState::AwaitingName => negotiate_name(raw, handle, sess, registry).await,
            ConnState::Active => {
                if is_exit_command(raw) {
                    return Ok(());
                }
                if let Some(name) = &sess.name {
                    registry.broadcast(name.as_str(), raw).await;
                }
            }
        }
    }
}

/// One round of the naming handshake. Anything unusable re-prompts; the
/// session stays in `AwaitingName` until a name is accepted.
async fn negotiate_name(
    raw: &str,
    handle: &OutboundHandle,
    sess: &mut Session,
    registry: &Registry,
) {
    let Some(name) = Username::parse(raw) else {
        handle.send(ServerLine::NameInUse);
        return;
    };
    match registry.try_register(&name, handle.clone()).await {
        Ok(()) => {
            debug!(%name, "registered");
            handle.send(ServerLine::Welcome(name.clone()));
            handle.send(ServerLine::Users(registry.usernames().await));
            sess.name = Some(name);
            sess.state = ConnState::Active;
        }
        Err(RegistryError::NameTaken) => handle.send(ServerLine::NameInUse),
    }
}

fn is_exit_command(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("/quit") || raw.eq_ignore_ascii_case("/exit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_commands_are_case_insensitive() {
        assert!(is_exit_command("/quit"));
        assert!(is_exit_command("/QUIT"));
        assert!(is_exit_command("/Exit"));
    }

    #[test]
    fn chat_text_is_not_an_exit_command() {
        assert!(!is_exit_command("quit"));
        assert!(!is_exit_command("/quit now"));
        assert!(!is_exit_command(""));
    }
}
