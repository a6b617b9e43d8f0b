use parley_core::Username;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    AwaitingName,
    Active,
}

/// Per-connection state, owned by the task driving the connection.
///
/// `name` is set exactly once, when registration succeeds; a session that
/// never leaves `AwaitingName` keeps `None` and leaves no trace in the
/// registry.
#[derive(Debug)]
pub struct Session {
    pub name: Option<Username>,
    pub state: ConnState,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            name: None,
            state: ConnState::AwaitingName,
        }
    }
}
