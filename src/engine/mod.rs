pub mod network;
pub mod runner;
pub mod telnet;

pub use network::{NetworkManager, TcpTransport};
pub use runner::{MudEngine, DEFAULT_ADDR, DEFAULT_TICK_MS};

use tokio::sync::mpsc;

use crate::core::session::SessionId;

/// Connection events that bridge the socket tasks and the tick loop
#[derive(Debug)]
pub enum EngineEvent {
    /// A connection was accepted; text sent on the channel reaches the client.
    Opened(SessionId, mpsc::UnboundedSender<String>),
    LineReceived(SessionId, String),
    Closed(SessionId),
}
