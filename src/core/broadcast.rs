/// Audience selection for outbound text
use crate::core::session::{SessionId, SessionRegistry};

/// Where outbound text ends up. Implemented by the transport.
pub trait Sink {
    /// Fire-and-forget; unknown sessions are ignored.
    fn send(&mut self, session: SessionId, text: &str);
}

/// Routes text to one session, a room, or the whole world.
///
/// Membership is read from the registry at call time, so a handler that moves
/// a session between two broadcasts sees the room as it is at each call.
pub struct Router<'a> {
    sink: &'a mut dyn Sink,
}

impl<'a> Router<'a> {
    pub fn new(sink: &'a mut dyn Sink) -> Self {
        Self { sink }
    }

    pub fn to_one(&mut self, sessions: &SessionRegistry, session: SessionId, text: &str) {
        if sessions.contains(session) {
            self.sink.send(session, text);
        }
    }

    pub fn to_room(
        &mut self,
        sessions: &SessionRegistry,
        room: &str,
        text: &str,
        exclude: Option<SessionId>,
    ) {
        for session in sessions.all_sessions_in(room) {
            if Some(session.id) != exclude {
                self.sink.send(session.id, text);
            }
        }
    }

    /// Every named session. Sessions still waiting for a name hear nothing.
    pub fn to_all(&mut self, sessions: &SessionRegistry, text: &str, exclude: Option<SessionId>) {
        for session in sessions.all_named() {
            if Some(session.id) != exclude {
                self.sink.send(session.id, text);
            }
        }
    }

    pub fn to_all_named(&mut self, sessions: &SessionRegistry, text: &str) {
        self.to_all(sessions, text, None);
    }
}

/// Collects everything sent, in order. Handy for driving the core without a network.
#[derive(Debug, Default, Clone)]
pub struct Outbox {
    pub sent: Vec<(SessionId, String)>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text received by one session, in order.
    pub fn for_session(&self, session: SessionId) -> Vec<&str> {
        self.sent
            .iter()
            .filter(|(id, _)| *id == session)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl Sink for Outbox {
    fn send(&mut self, session: SessionId, text: &str) {
        self.sent.push((session, text.to_string()));
    }
}
