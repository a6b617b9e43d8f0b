pub mod protocol;
pub mod username;

pub use protocol::{DEFAULT_PORT, SYSTEM_SENDER, ServerLine};
pub use username::Username;
