use crate::registry::{
    CloseOutcome, CreateOutcome, JoinOutcome, RegistryError, Session, SessionRegistry,
};
use pairlink_core::{ConnectionId, Role, SessionId};
use std::collections::HashMap;

/// In-process registry. Not synchronised: the relay actor owns it and
/// applies every mutation from a single task.
#[derive(Debug, Default)]
pub struct MemorySessionRegistry {
    sessions: HashMap<SessionId, Session>,
    bindings: HashMap<ConnectionId, (SessionId, Role)>,
}

impl MemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRegistry for MemorySessionRegistry {
    fn create(
        &mut self,
        session_id: SessionId,
        connection: ConnectionId,
    ) -> Result<CreateOutcome, RegistryError> {
        if let Some((bound, role)) = self.bindings.get(&connection) {
            if *bound == session_id && *role == Role::Receiver {
                return Ok(CreateOutcome { replaced: None });
            }
            return Err(RegistryError::AlreadyBound(bound.clone()));
        }

        let session = self.sessions.entry(session_id.clone()).or_default();
        let replaced = session.receiver.replace(connection);
        if let Some(old) = replaced {
            self.bindings.remove(&old);
        }
        self.bindings.insert(connection, (session_id, Role::Receiver));

        Ok(CreateOutcome { replaced })
    }

    fn join(
        &mut self,
        session_id: &SessionId,
        connection: ConnectionId,
    ) -> Result<JoinOutcome, RegistryError> {
        if let Some((bound, role)) = self.bindings.get(&connection) {
            if bound != session_id || *role == Role::Receiver {
                return Err(RegistryError::AlreadyBound(bound.clone()));
            }
        }

        let Some(session) = self.sessions.get_mut(session_id) else {
            return Err(RegistryError::SessionNotFound(session_id.clone()));
        };
        let Some(receiver) = session.receiver else {
            return Err(RegistryError::NoReceiver(session_id.clone()));
        };

        let replaced = session
            .sender
            .replace(connection)
            .filter(|old| *old != connection);
        if let Some(old) = replaced {
            self.bindings.remove(&old);
        }
        self.bindings
            .insert(connection, (session_id.clone(), Role::Sender));

        Ok(JoinOutcome { receiver, replaced })
    }

    fn resolve_peer(&self, connection: &ConnectionId) -> Option<ConnectionId> {
        let (session_id, role) = self.bindings.get(connection)?;
        self.sessions.get(session_id)?.peer_of(*role)
    }

    fn session_of(&self, connection: &ConnectionId) -> Option<(SessionId, Role)> {
        self.bindings.get(connection).cloned()
    }

    fn remove_connection(&mut self, connection: &ConnectionId) -> CloseOutcome {
        let Some((session_id, role)) = self.bindings.remove(connection) else {
            return CloseOutcome::Unbound;
        };

        match role {
            Role::Receiver => {
                let sender = self
                    .sessions
                    .remove(&session_id)
                    .and_then(|session| session.sender);
                if let Some(sender) = sender {
                    self.bindings.remove(&sender);
                }
                CloseOutcome::HostLeft { session_id, sender }
            }
            Role::Sender => {
                let receiver = self.sessions.get_mut(&session_id).and_then(|session| {
                    if session.sender == Some(*connection) {
                        session.sender = None;
                    }
                    session.receiver
                });
                CloseOutcome::SenderLeft {
                    session_id,
                    receiver,
                }
            }
        }
    }

    fn get(&self, session_id: &SessionId) -> Option<Session> {
        self.sessions.get(session_id).cloned()
    }

    fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
