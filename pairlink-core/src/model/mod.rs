mod connection;
mod session;
mod signaling;

pub use connection::ConnectionId;
pub use session::{Role, SessionId};
pub use signaling::{ServerEvent, SignalMessage};
