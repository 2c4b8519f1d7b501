/// Command dispatch: maps a command word to its handler and runs it
use tracing::{debug, info};

use crate::core::broadcast::Router;
use crate::core::objects::ObjectRegistry;
use crate::core::session::{SessionId, SessionRegistry};
use crate::core::world::WorldGraph;
use crate::error::CommandError;

/// Per-world text and fixed places, taken from the world definition.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub world_name: String,
    pub start: String,
    pub writable: Option<String>,
    pub banner: String,
    pub welcome: String,
}

/// Everything a handler may touch while running one command.
pub struct CommandContext<'a> {
    pub world: &'a WorldGraph,
    pub settings: &'a GameSettings,
    pub objects: &'a mut ObjectRegistry,
    pub sessions: &'a mut SessionRegistry,
    pub out: Router<'a>,
}

impl CommandContext<'_> {
    /// Name and room of a named session.
    fn whereabouts(&self, id: SessionId) -> Option<(String, String)> {
        let session = self.sessions.get(id)?;
        Some((session.name()?.to_string(), session.room()?.to_string()))
    }

    fn reply(&mut self, id: SessionId, text: &str) {
        self.out.to_one(self.sessions, id, text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Say,
    Shout,
    Look,
    Examine,
    Take,
    Drop,
    Inventory,
    Write,
    Go,
    Empty,
    Quit,
}

type Handler = fn(&mut CommandContext<'_>, SessionId, &str) -> Result<(), CommandError>;

struct CommandEntry {
    kind: CommandKind,
    /// Usage and summary shown by `help`; `None` keeps a command out of the list.
    help: Option<(&'static str, &'static str)>,
}

/// Every command, in the order `help` lists them.
static COMMANDS: &[CommandEntry] = &[
    CommandEntry { kind: CommandKind::Help, help: None },
    CommandEntry {
        kind: CommandKind::Say,
        help: Some(("say <message>", "Say something out loud, e.g. 'say Hello'")),
    },
    CommandEntry {
        kind: CommandKind::Shout,
        help: Some(("shout <message>", "Shout something, e.g. 'shout Hello'")),
    },
    CommandEntry {
        kind: CommandKind::Look,
        help: Some(("look", "Look at the surroundings, e.g. 'look'")),
    },
    CommandEntry {
        kind: CommandKind::Examine,
        help: Some(("examine <thing>", "Examine an object in detail, e.g. 'examine key'")),
    },
    CommandEntry {
        kind: CommandKind::Take,
        help: Some(("take <thing>", "Pick an object up e.g. 'take key'")),
    },
    CommandEntry {
        kind: CommandKind::Drop,
        help: Some(("drop <thing>", "Put an object down e.g. 'drop key'")),
    },
    CommandEntry {
        kind: CommandKind::Inventory,
        help: Some(("inventory", "List what you're carrying")),
    },
    CommandEntry {
        kind: CommandKind::Write,
        help: Some(("write <message>", "Write on the whiteboard e.g. 'write Sam was here'")),
    },
    CommandEntry {
        kind: CommandKind::Go,
        help: Some(("go <exit>", "Move through the exit specified, e.g. 'go outside'")),
    },
    CommandEntry { kind: CommandKind::Empty, help: None },
    CommandEntry { kind: CommandKind::Quit, help: None },
];

impl CommandKind {
    /// Exact, case-sensitive lookup of a command word.
    pub fn parse(word: &str) -> Option<Self> {
        COMMANDS.iter().map(|c| c.kind).find(|kind| kind.word() == word)
    }

    pub fn word(self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::Say => "say",
            CommandKind::Shout => "shout",
            CommandKind::Look => "look",
            CommandKind::Examine => "examine",
            CommandKind::Take => "take",
            CommandKind::Drop => "drop",
            CommandKind::Inventory => "inventory",
            CommandKind::Write => "write",
            CommandKind::Go => "go",
            CommandKind::Empty => "",
            CommandKind::Quit => "quit",
        }
    }

    fn handler(self) -> Handler {
        match self {
            CommandKind::Help => help,
            CommandKind::Say => say,
            CommandKind::Shout => shout,
            CommandKind::Look => look,
            CommandKind::Examine => examine,
            CommandKind::Take => take,
            CommandKind::Drop => drop_object,
            CommandKind::Inventory => inventory,
            CommandKind::Write => write,
            CommandKind::Go => go,
            CommandKind::Empty => empty,
            CommandKind::Quit => quit,
        }
    }
}

/// Runs one command for one session.
///
/// The first thing an unnamed session sends is always taken as its name.
/// Commands from sessions that are no longer registered are dropped.
pub fn dispatch(ctx: &mut CommandContext<'_>, id: SessionId, word: &str, argument: &str) {
    let Some(session) = ctx.sessions.get(id) else {
        debug!(session = %id, "command from closed session ignored");
        return;
    };

    if !session.is_named() {
        enter_game(ctx, id, word);
        return;
    }

    debug!(session = %id, command = word, "dispatching command");
    let result = match CommandKind::parse(word) {
        Some(kind) => kind.handler()(ctx, id, argument),
        None => Err(CommandError::NoSuchCommand(word.to_string())),
    };

    if let Err(err) = result {
        ctx.reply(id, &err.to_string());
    }
}

fn enter_game(ctx: &mut CommandContext<'_>, id: SessionId, name: &str) {
    let start = ctx.settings.start.clone();
    if !ctx.sessions.set_name_and_place(id, name, &start) {
        return;
    }
    info!(session = %id, name, room = %start, "player entered the game");

    ctx.out
        .to_all_named(ctx.sessions, &format!("{name} entered the game"));

    let welcome = format!(
        "{}\nWelcome to {}, {}.\n{}",
        ctx.settings.banner, ctx.settings.world_name, name, ctx.settings.welcome
    );
    ctx.reply(id, &welcome);

    if let Some(description) = ctx.world.describe(&start) {
        let description = description.to_string();
        ctx.reply(id, &description);
    }
}

fn help(ctx: &mut CommandContext<'_>, id: SessionId, _: &str) -> Result<(), CommandError> {
    ctx.reply(id, "Commands:");
    for (usage, summary) in COMMANDS.iter().filter_map(|c| c.help) {
        ctx.reply(id, &format!("  {usage:<16}- {summary}"));
    }
    Ok(())
}

fn say(ctx: &mut CommandContext<'_>, id: SessionId, text: &str) -> Result<(), CommandError> {
    let Some((name, room)) = ctx.whereabouts(id) else {
        return Ok(());
    };
    ctx.out
        .to_room(ctx.sessions, &room, &format!("{name} says: {text}"), None);
    Ok(())
}

fn shout(ctx: &mut CommandContext<'_>, id: SessionId, text: &str) -> Result<(), CommandError> {
    let Some((name, _)) = ctx.whereabouts(id) else {
        return Ok(());
    };
    ctx.out
        .to_all_named(ctx.sessions, &format!("{name} shouts: {text}"));
    Ok(())
}

fn examine(ctx: &mut CommandContext<'_>, id: SessionId, thing: &str) -> Result<(), CommandError> {
    let Some((_, room)) = ctx.whereabouts(id) else {
        return Ok(());
    };
    if !ctx.objects.is_here(thing, &room) {
        return Err(CommandError::NotHere(thing.to_string()));
    }
    let description = ctx
        .objects
        .lookup(thing)
        .map(|o| o.description.clone())
        .ok_or_else(|| CommandError::NoSuchObject(thing.to_string()))?;
    ctx.reply(id, &description);
    Ok(())
}

fn look(ctx: &mut CommandContext<'_>, id: SessionId, _: &str) -> Result<(), CommandError> {
    let Some((_, room)) = ctx.whereabouts(id) else {
        return Ok(());
    };

    let description = ctx.world.describe(&room).unwrap_or_default().to_string();
    ctx.reply(id, &description);

    let things: Vec<String> = ctx.objects.in_room(&room).map(|o| format!("a {}", o.name)).collect();
    if !things.is_empty() {
        ctx.reply(id, &format!("You can see {}", things.join(", ")));
    }

    let players: Vec<&str> = ctx.sessions.all_sessions_in(&room).filter_map(|s| s.name()).collect();
    let players = format!("Players here: {}", players.join(", "));
    ctx.reply(id, &players);

    let exits: Vec<&str> = ctx.world.exits(&room).into_iter().map(|(k, _)| k).collect();
    let exits = format!("Exits are: {}", exits.join(", "));
    ctx.reply(id, &exits);
    Ok(())
}

fn take(ctx: &mut CommandContext<'_>, id: SessionId, thing: &str) -> Result<(), CommandError> {
    let Some((_, room)) = ctx.whereabouts(id) else {
        return Ok(());
    };
    ctx.objects.take(thing, id, &room)?;
    ctx.reply(id, &format!("You take the {thing}."));
    Ok(())
}

fn drop_object(ctx: &mut CommandContext<'_>, id: SessionId, thing: &str) -> Result<(), CommandError> {
    let Some((_, room)) = ctx.whereabouts(id) else {
        return Ok(());
    };
    ctx.objects.drop(thing, id, &room)?;
    ctx.reply(id, &format!("You drop the {thing}."));
    Ok(())
}

fn inventory(ctx: &mut CommandContext<'_>, id: SessionId, _: &str) -> Result<(), CommandError> {
    let held: Vec<String> = ctx
        .sessions
        .inventory_of(id, ctx.objects)
        .map(|o| format!("\n- a {}", o.name))
        .collect();
    if held.is_empty() {
        ctx.reply(id, "You're not carrying anything.");
    } else {
        ctx.reply(id, &format!("You're carrying:{}", held.concat()));
    }
    Ok(())
}

fn write(ctx: &mut CommandContext<'_>, id: SessionId, text: &str) -> Result<(), CommandError> {
    let Some((_, room)) = ctx.whereabouts(id) else {
        return Ok(());
    };
    let surface = match &ctx.settings.writable {
        Some(surface) if ctx.objects.is_here(surface, &room) => surface.clone(),
        _ => return Err(CommandError::NothingToWrite),
    };
    ctx.objects
        .rewrite_description(&surface, format!("It says '{text}'"))?;
    ctx.reply(id, &format!("You have written '{text}' on the {surface}."));
    Ok(())
}

fn go(ctx: &mut CommandContext<'_>, id: SessionId, exit: &str) -> Result<(), CommandError> {
    let Some((name, from)) = ctx.whereabouts(id) else {
        return Ok(());
    };
    let exit = exit.to_lowercase();
    let to = ctx
        .world
        .resolve_exit(&from, &exit)
        .ok_or_else(|| CommandError::NoSuchExit(exit.clone()))?
        .to_string();

    ctx.out.to_room(
        ctx.sessions,
        &from,
        &format!("{name} left via exit '{exit}'"),
        Some(id),
    );
    ctx.sessions.move_to(id, &to);
    ctx.out.to_room(
        ctx.sessions,
        &to,
        &format!("{name} arrived via exit '{exit}'"),
        Some(id),
    );
    ctx.reply(id, &format!("You arrive at '{to}'"));
    debug!(session = %id, from = %from, to = %to, "player moved");
    Ok(())
}

fn empty(ctx: &mut CommandContext<'_>, id: SessionId, _: &str) -> Result<(), CommandError> {
    ctx.reply(id, "Give me a command.");
    Ok(())
}

fn quit(ctx: &mut CommandContext<'_>, id: SessionId, _: &str) -> Result<(), CommandError> {
    ctx.reply(
        id,
        "To leave the game press ctrl-] and type 'quit' again at the telnet prompt.",
    );
    Ok(())
}
