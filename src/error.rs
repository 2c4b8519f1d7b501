/// Error types for towermud
///
/// Two families live here: the player-facing outcomes of a command, whose
/// `Display` text is exactly what the issuing session receives, and the
/// failures that can happen while loading world-authoring data.
use std::path::PathBuf;

use thiserror::Error;

/// Expected, user-facing outcomes of a command that did not go through.
///
/// None of these are faults: the dispatcher turns them into a single line
/// sent back to the issuing session and leaves world state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    // ========================================
    // Lookup failures
    // ========================================
    /// No object by that name exists anywhere in the catalog.
    #[error("There's no {0} here.")]
    NoSuchObject(String),

    #[error("You can't go '{0}'")]
    NoSuchExit(String),

    #[error("I don't understand '{0}'")]
    NoSuchCommand(String),

    // ========================================
    // Precondition failures
    // ========================================
    /// The object exists but is not lying in the session's room.
    #[error("There's no {0} here.")]
    NotHere(String),

    #[error("The {0} is far too heavy to pick up.")]
    NotPortable(String),

    #[error("You're not carrying a {0}.")]
    NotCarried(String),

    #[error("There's nothing to write on here.")]
    NothingToWrite,
}

/// Failures while loading or validating a world definition.
#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Failed to read world file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed world definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("World '{0}' has no rooms")]
    Empty(String),

    #[error("Room '{0}' is defined more than once")]
    DuplicateRoom(String),

    #[error("Exit '{keyword}' appears twice in room '{room}'")]
    DuplicateExit { room: String, keyword: String },

    #[error("Exit '{keyword}' in room '{room}' leads to unknown room '{target}'")]
    DanglingExit {
        room: String,
        keyword: String,
        target: String,
    },

    #[error("Object '{0}' is defined more than once")]
    DuplicateObject(String),

    #[error("Object '{object}' is placed in unknown room '{room}'")]
    UnknownObjectRoom { object: String, room: String },

    #[error("Starting room '{0}' does not exist")]
    UnknownStart(String),

    #[error("Writable object '{0}' does not exist")]
    UnknownWritable(String),

    #[error("No built-in world named '{0}'")]
    UnknownBuiltin(String),
}
