pub mod macros;

use std::path::Path;

use crate::core::world::WorldData;
use crate::error::WorldError;
use crate::register_worlds;

/// The world served when none is named.
pub const DEFAULT_WORLD: &str = "bush_house";

/// A world definition compiled into the binary
#[derive(Clone, Debug)]
pub struct WorldEntry {
    pub id: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

impl WorldEntry {
    pub fn load(&self) -> Result<WorldData, WorldError> {
        WorldData::from_json(self.source)
    }
}

// Bundled worlds - add a JSON file next to this one and an entry here
register_worlds! {
    bush_house => {
        file: "bush_house.json",
        description: "The Tower of Babel: seven rooms of Bush House and a whiteboard"
    }
}

/// Resolves a `--world` argument: a bundled world id, or a path to a JSON file.
pub fn resolve(world: Option<&str>) -> Result<WorldData, WorldError> {
    let world = world.unwrap_or(DEFAULT_WORLD);
    if let Some(entry) = get_world(world) {
        return entry.load();
    }
    if Path::new(world).exists() {
        return WorldData::from_path(world);
    }
    Err(WorldError::UnknownBuiltin(world.to_string()))
}

impl WorldData {
    /// The bundled Tower of Babel world.
    pub fn builtin() -> Result<Self, WorldError> {
        resolve(None)
    }
}
