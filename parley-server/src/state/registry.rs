use std::collections::BTreeMap;

use tokio::sync::RwLock;

use parley_core::{ServerLine, Username};

use crate::error::RegistryError;
use crate::net::output::OutboundHandle;

/// Shared map of currently-joined participants.
///
/// The single source of truth for who is connected and how to reach them.
/// All mutation funnels through the methods here; sessions never touch the
/// map directly. Fan-out works on a snapshot of the handles, so no lock is
/// held across sink delivery and a slow peer never stalls registrations or
/// other broadcasts.
#[derive(Debug, Default)]
pub struct Registry {
    participants: RwLock<BTreeMap<String, OutboundHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claims `name` for the given sink; exactly one of two
    /// racing callers for the same name wins. On success the join notice
    /// goes out to everyone, the new participant included.
    ///
    /// Never blocks waiting for a name to free up; the caller re-prompts
    /// and retries with a different name.
    pub async fn try_register(
        &self,
        name: &Username,
        handle: OutboundHandle,
    ) -> Result<(), RegistryError> {
        let recipients = {
            let mut g = self.participants.write().await;
            if g.contains_key(name.as_str()) {
                return Err(RegistryError::NameTaken);
            }
            g.insert(name.as_str().to_string(), handle);
            snapshot(&g)
        };
        deliver(&recipients, &ServerLine::join_notice(name));
        Ok(())
    }

    /// Removes `name` if present; a no-op otherwise. The leave notice goes
    /// out only on actual removal, so calling this twice cannot produce two
    /// notices.
    pub async fn unregister(&self, name: &Username) {
        let recipients = {
            let mut g = self.participants.write().await;
            if g.remove(name.as_str()).is_none() {
                return;
            }
            snapshot(&g)
        };
        deliver(&recipients, &ServerLine::leave_notice(name));
    }

    /// Relays one chat line to every participant registered at the time of
    /// the call. Per-recipient delivery failures are isolated: a dead sink
    /// neither aborts the fan-out nor gets removed here (removal is the
    /// owning session's job).
    pub async fn broadcast(&self, from: &str, body: &str) {
        let recipients = snapshot(&*self.participants.read().await);
        deliver(
            &recipients,
            &ServerLine::Chat {
                from: from.to_string(),
                body: body.to_string(),
            },
        );
    }

    /// Sorted snapshot of the currently-joined names.
    pub async fn usernames(&self) -> Vec<String> {
        self.participants.read().await.keys().cloned().collect()
    }
}

fn snapshot(participants: &BTreeMap<String, OutboundHandle>) -> Vec<OutboundHandle> {
    participants.values().cloned().collect()
}

fn deliver(recipients: &[OutboundHandle], line: &ServerLine) {
    for handle in recipients {
        handle.send(line.clone());
    }
}
