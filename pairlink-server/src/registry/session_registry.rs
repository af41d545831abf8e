use crate::registry::RegistryError;
use pairlink_core::{ConnectionId, Role, SessionId};

/// One pairing slot: at most one receiver and at most one sender.
///
/// Holds connection ids only; the registry never owns a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub receiver: Option<ConnectionId>,
    pub sender: Option<ConnectionId>,
}

impl Session {
    pub fn peer_of(&self, role: Role) -> Option<ConnectionId> {
        match role {
            Role::Receiver => self.sender,
            Role::Sender => self.receiver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    /// Receiver that was overwritten by this create, if any.
    pub replaced: Option<ConnectionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Host to notify with `user-joined`.
    pub receiver: ConnectionId,
    /// Previous sender pushed out of the slot, if any.
    pub replaced: Option<ConnectionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The connection held no slot.
    Unbound,
    /// The receiver left and the session was deleted.
    HostLeft {
        session_id: SessionId,
        sender: Option<ConnectionId>,
    },
    /// The sender left; the session stays open for another join.
    SenderLeft {
        session_id: SessionId,
        receiver: Option<ConnectionId>,
    },
}

/// Storage seam for sessions and the connection → session bindings.
///
/// Every mutation of pairing state goes through this trait, so the relay
/// could be backed by something other than [`MemorySessionRegistry`]
/// without touching its routing.
///
/// [`MemorySessionRegistry`]: crate::registry::MemorySessionRegistry
pub trait SessionRegistry: Send + Sync {
    /// Make `connection` the receiver of `session_id`, creating the session
    /// when needed. The last create wins.
    fn create(
        &mut self,
        session_id: SessionId,
        connection: ConnectionId,
    ) -> Result<CreateOutcome, RegistryError>;

    /// Make `connection` the sender of an existing session that has a receiver.
    /// The current sender may join its own session again.
    fn join(
        &mut self,
        session_id: &SessionId,
        connection: ConnectionId,
    ) -> Result<JoinOutcome, RegistryError>;

    /// The other endpoint of the caller's session, if both are present.
    fn resolve_peer(&self, connection: &ConnectionId) -> Option<ConnectionId>;

    fn session_of(&self, connection: &ConnectionId) -> Option<(SessionId, Role)>;

    /// Drop everything `connection` held. Called once the transport has closed.
    fn remove_connection(&mut self, connection: &ConnectionId) -> CloseOutcome;

    fn get(&self, session_id: &SessionId) -> Option<Session>;

    fn contains(&self, session_id: &SessionId) -> bool {
        self.get(session_id).is_some()
    }

    fn session_count(&self) -> usize;
}
