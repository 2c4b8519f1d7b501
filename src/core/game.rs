/// The world-update loop: owns all shared state and applies one tick at a time
use tracing::{debug, info};

use crate::core::broadcast::{Router, Sink};
use crate::core::commands::{self, CommandContext, GameSettings};
use crate::core::objects::ObjectRegistry;
use crate::core::session::{SessionId, SessionRegistry};
use crate::core::world::{WorldData, WorldGraph};

/// One line of player input, already split into command word and argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub session: SessionId,
    pub word: String,
    pub argument: String,
}

impl PendingCommand {
    /// Splits a raw input line: the first whitespace-delimited token is the
    /// command word, the rest (leading whitespace trimmed) is the argument.
    pub fn parse(session: SessionId, line: &str) -> Self {
        let line = line.trim();
        let (word, argument) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };
        Self {
            session,
            word: word.to_string(),
            argument: argument.to_string(),
        }
    }
}

/// What the core needs from whatever carries bytes to and from players.
///
/// Every drain returns immediately, possibly with nothing.
pub trait Transport: Sink {
    /// Called once at the start of every tick, before the drains.
    fn poll(&mut self) {}

    fn new_sessions(&mut self) -> Vec<SessionId>;

    fn closed_sessions(&mut self) -> Vec<SessionId>;

    fn pending_commands(&mut self) -> Vec<PendingCommand>;
}

/// Top-level controller. Owns the registries and hands them to the dispatcher
/// and router by reference for each event.
pub struct Game {
    world: WorldGraph,
    settings: GameSettings,
    objects: ObjectRegistry,
    sessions: SessionRegistry,
}

impl Game {
    /// Builds a game from a world definition that has already been validated.
    pub fn new(data: &WorldData) -> Self {
        Self {
            world: WorldGraph::from_rooms(&data.rooms),
            settings: GameSettings {
                world_name: data.name.clone(),
                start: data.start.clone(),
                writable: data.writable.clone(),
                banner: data.banner.clone(),
                welcome: data.welcome.clone(),
            },
            objects: ObjectRegistry::from_catalog(&data.objects),
            sessions: SessionRegistry::new(),
        }
    }

    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Drains opened sessions, then closed ones, then commands, applying each in order.
    pub fn tick<T: Transport>(&mut self, transport: &mut T) {
        transport.poll();

        for id in transport.new_sessions() {
            self.open_session(id, transport);
        }

        for id in transport.closed_sessions() {
            self.close_session(id, transport);
        }

        for command in transport.pending_commands() {
            self.handle_command(&command, transport);
        }
    }

    pub fn open_session(&mut self, id: SessionId, sink: &mut dyn Sink) {
        if !self.sessions.open(id) {
            return;
        }
        info!(session = %id, "session opened");
        Router::new(sink).to_one(&self.sessions, id, "What is your name?");
    }

    pub fn close_session(&mut self, id: SessionId, sink: &mut dyn Sink) {
        let Some(session) = self.sessions.close(id, &mut self.objects) else {
            debug!(session = %id, "close for unknown session ignored");
            return;
        };
        info!(session = %id, name = ?session.name(), "session closed");

        if let Some(name) = session.name() {
            Router::new(sink).to_all_named(&self.sessions, &format!("{name} has left the building"));
        }
    }

    pub fn handle_command(&mut self, command: &PendingCommand, sink: &mut dyn Sink) {
        let mut ctx = CommandContext {
            world: &self.world,
            settings: &self.settings,
            objects: &mut self.objects,
            sessions: &mut self.sessions,
            out: Router::new(sink),
        };
        commands::dispatch(&mut ctx, command.session, &command.word, &command.argument);
    }
}
