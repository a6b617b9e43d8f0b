pub mod config;
pub mod error;
pub mod net;
pub mod state;

// Convenient re-exports (so call sites can do `parley_server::Registry`, etc.)
pub use net::connection::handle_connection;
pub use state::{
    registry::Registry,
    session::{ConnState, Session},
};
