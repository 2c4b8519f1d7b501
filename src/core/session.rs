/// Live participant sessions
use std::fmt;

use crate::core::objects::{Object, ObjectRegistry};

/// Opaque, transport-assigned session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A session is either waiting for its name or playing in some room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unnamed,
    Named { name: String, room: String },
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub state: SessionState,
}

impl Session {
    pub fn name(&self) -> Option<&str> {
        match &self.state {
            SessionState::Named { name, .. } => Some(name.as_str()),
            SessionState::Unnamed => None,
        }
    }

    pub fn room(&self) -> Option<&str> {
        match &self.state {
            SessionState::Named { room, .. } => Some(room.as_str()),
            SessionState::Unnamed => None,
        }
    }

    pub fn is_named(&self) -> bool {
        matches!(self.state, SessionState::Named { .. })
    }
}

/// Registry of connected sessions, kept in the order they were opened.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Vec<Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh, unnamed session. Re-opening a known id is a no-op.
    pub fn open(&mut self, id: SessionId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.sessions.push(Session {
            id,
            state: SessionState::Unnamed,
        });
        true
    }

    /// Removes a session and drops whatever it carried into its last room.
    ///
    /// Returns the removed session, or `None` if it was already gone.
    pub fn close(&mut self, id: SessionId, objects: &mut ObjectRegistry) -> Option<Session> {
        let index = self.sessions.iter().position(|s| s.id == id)?;
        let session = self.sessions.remove(index);
        if let Some(room) = session.room() {
            objects.release_all(id, room);
        }
        Some(session)
    }

    /// Names an unnamed session and places it in `start`.
    ///
    /// Returns false (and changes nothing) if the session is unknown or
    /// already named.
    pub fn set_name_and_place(&mut self, id: SessionId, name: &str, start: &str) -> bool {
        match self.get_mut(id) {
            Some(session) if !session.is_named() => {
                session.state = SessionState::Named {
                    name: name.to_string(),
                    room: start.to_string(),
                };
                true
            }
            _ => false,
        }
    }

    pub fn move_to(&mut self, id: SessionId, new_room: &str) -> bool {
        match self.get_mut(id).map(|s| &mut s.state) {
            Some(SessionState::Named { room, .. }) => {
                *room = new_room.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: SessionId) -> bool {
        self.get(id).is_some()
    }

    pub fn name_of(&self, id: SessionId) -> Option<&str> {
        self.get(id)?.name()
    }

    pub fn room_of(&self, id: SessionId) -> Option<&str> {
        self.get(id)?.room()
    }

    pub fn inventory_of<'a>(
        &self,
        id: SessionId,
        objects: &'a ObjectRegistry,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        objects.carried_by(id)
    }

    /// Named sessions currently in `room`, in the order they connected.
    pub fn all_sessions_in<'a>(&'a self, room: &'a str) -> impl Iterator<Item = &'a Session> + 'a {
        self.sessions.iter().filter(move |s| s.room() == Some(room))
    }

    pub fn all_named(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter().filter(|s| s.is_named())
    }

    pub fn all_session_ids(&self) -> impl Iterator<Item = SessionId> + '_ {
        self.sessions.iter().map(|s| s.id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
