use pairlink_core::SessionId;
use thiserror::Error;

/// Rejections a registry mutation can produce.
///
/// The `Display` text is what the rejected participant sees in its
/// `{"type":"error"}` frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Invalid or expired room code.")]
    SessionNotFound(SessionId),

    #[error("Invalid or expired room code.")]
    NoReceiver(SessionId),

    #[error("This connection already belongs to room {0}.")]
    AlreadyBound(SessionId),
}
