use pairlink_core::ConnectionId;

/// Events the transport layer hands to the relay, processed strictly in
/// arrival order.
#[derive(Debug)]
pub enum RelayCommand {
    /// A text frame received on `connection_id`, still unparsed.
    Inbound {
        connection_id: ConnectionId,
        text: String,
    },

    /// The transport noticed `connection_id` closed.
    Disconnect { connection_id: ConnectionId },
}
