//! The line protocol spoken between relay and client.
//!
//! One UTF-8 text line per logical message, newline-terminated. Everything
//! the server emits is a [`ServerLine`]; join/leave notices are ordinary
//! chat lines from the pseudo-sender [`SYSTEM_SENDER`].

use std::fmt;

use crate::username::Username;

/// Default TCP port for both server and client.
pub const DEFAULT_PORT: u16 = 12345;

/// Pseudo-sender used for join/leave notices.
pub const SYSTEM_SENDER: &str = "SERVER";

/// One server-to-client line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerLine {
    /// Ask the peer for a username.
    EnterName,
    /// Chosen name invalid or taken; the peer should resend.
    NameInUse,
    /// Registration accepted.
    Welcome(Username),
    /// Roster snapshot, sent once after the welcome.
    Users(Vec<String>),
    /// A relayed chat line, `SERVER` notices included.
    Chat { from: String, body: String },
}

impl ServerLine {
    pub fn join_notice(name: &Username) -> Self {
        Self::Chat {
            from: SYSTEM_SENDER.to_string(),
            body: format!("{name} has joined the chat."),
        }
    }

    pub fn leave_notice(name: &Username) -> Self {
        Self::Chat {
            from: SYSTEM_SENDER.to_string(),
            body: format!("{name} has left the chat."),
        }
    }

    /// The exact wire text, without the trailing newline.
    pub fn render(&self) -> String {
        match self {
            Self::EnterName => "ENTERNAME".to_string(),
            Self::NameInUse => "NAMEINUSE".to_string(),
            Self::Welcome(name) => format!("WELCOME {name}"),
            Self::Users(names) => format!("USERS {}", names.join(",")),
            Self::Chat { from, body } => format!("{from}: {body}"),
        }
    }

    /// Classifies a raw line received from the server.
    ///
    /// Anything that is not a control line is treated as a chat line; a line
    /// without a `": "` separator comes back as a chat line with an empty
    /// sender, so callers can still display it verbatim.
    pub fn parse(line: &str) -> Self {
        if line == "ENTERNAME" {
            return Self::EnterName;
        }
        if line == "NAMEINUSE" {
            return Self::NameInUse;
        }
        if let Some(rest) = line.strip_prefix("WELCOME ") {
            if let Some(name) = Username::parse(rest) {
                return Self::Welcome(name);
            }
        }
        if let Some(rest) = line.strip_prefix("USERS ") {
            return Self::Users(
                rest.split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }
        match line.split_once(": ") {
            Some((from, body)) => Self::Chat {
                from: from.to_string(),
                body: body.to_string(),
            },
            None => Self::Chat {
                from: String::new(),
                body: line.to_string(),
            },
        }
    }
}

impl fmt::Display for ServerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Username {
        Username::parse(s).expect("valid name")
    }

    #[test]
    fn renders_control_lines() {
        assert_eq!(ServerLine::EnterName.render(), "ENTERNAME");
        assert_eq!(ServerLine::NameInUse.render(), "NAMEINUSE");
        assert_eq!(ServerLine::Welcome(name("alice")).render(), "WELCOME alice");
        assert_eq!(
            ServerLine::Users(vec!["alice".into(), "bob".into()]).render(),
            "USERS alice,bob"
        );
    }

    #[test]
    fn renders_chat_lines_with_sender_prefix() {
        let line = ServerLine::Chat {
            from: "alice".into(),
            body: "hi".into(),
        };
        assert_eq!(line.render(), "alice: hi");

        // Empty bodies stay on the wire as-is.
        let empty = ServerLine::Chat {
            from: "alice".into(),
            body: String::new(),
        };
        assert_eq!(empty.render(), "alice: ");
    }

    #[test]
    fn join_and_leave_notices_come_from_server() {
        assert_eq!(
            ServerLine::join_notice(&name("bob")).render(),
            "SERVER: bob has joined the chat."
        );
        assert_eq!(
            ServerLine::leave_notice(&name("bob")).render(),
            "SERVER: bob has left the chat."
        );
    }

    #[test]
    fn parses_control_lines() {
        assert_eq!(ServerLine::parse("ENTERNAME"), ServerLine::EnterName);
        assert_eq!(ServerLine::parse("NAMEINUSE"), ServerLine::NameInUse);
        assert_eq!(
            ServerLine::parse("WELCOME alice"),
            ServerLine::Welcome(name("alice"))
        );
        assert_eq!(
            ServerLine::parse("USERS alice,bob"),
            ServerLine::Users(vec!["alice".into(), "bob".into()])
        );
    }

    #[test]
    fn parses_chat_lines_at_first_separator() {
        assert_eq!(
            ServerLine::parse("alice: one: two"),
            ServerLine::Chat {
                from: "alice".into(),
                body: "one: two".into(),
            }
        );
    }

    #[test]
    fn unrecognized_line_falls_back_to_chat() {
        assert_eq!(
            ServerLine::parse("garbage"),
            ServerLine::Chat {
                from: String::new(),
                body: "garbage".into(),
            }
        );
    }
}
