/// Static world topology and the authoring format it is loaded from
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::WorldError;

/// One exit as written in a world file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExitData {
    pub keyword: String,
    pub to: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomData {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub exits: Vec<ExitData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectData {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub portable: bool,
    /// Initial room.
    pub location: String,
}

/// A complete world definition: rooms, objects and the text shown to newcomers.
///
/// Arrays rather than maps keep authoring order, which is the order exits are
/// listed in and the catalog order objects are listed in.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldData {
    pub name: String,
    pub start: String,
    /// Object whose description can be replaced with `write`.
    #[serde(default)]
    pub writable: Option<String>,
    #[serde(default)]
    pub banner: String,
    #[serde(default)]
    pub welcome: String,
    pub rooms: Vec<RoomData>,
    #[serde(default)]
    pub objects: Vec<ObjectData>,
}

impl WorldData {
    pub fn from_json(text: &str) -> Result<Self, WorldError> {
        let data: WorldData = serde_json::from_str(text)?;
        data.validate()?;
        Ok(data)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks every cross reference so the running game never has to.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.rooms.is_empty() {
            return Err(WorldError::Empty(self.name.clone()));
        }

        let mut rooms = HashSet::new();
        for room in &self.rooms {
            if !rooms.insert(room.name.as_str()) {
                return Err(WorldError::DuplicateRoom(room.name.clone()));
            }
        }

        for room in &self.rooms {
            let mut keywords = HashSet::new();
            for exit in &room.exits {
                if !keywords.insert(exit.keyword.as_str()) {
                    return Err(WorldError::DuplicateExit {
                        room: room.name.clone(),
                        keyword: exit.keyword.clone(),
                    });
                }
                if !rooms.contains(exit.to.as_str()) {
                    return Err(WorldError::DanglingExit {
                        room: room.name.clone(),
                        keyword: exit.keyword.clone(),
                        target: exit.to.clone(),
                    });
                }
            }
        }

        let mut objects = HashSet::new();
        for object in &self.objects {
            if !objects.insert(object.name.as_str()) {
                return Err(WorldError::DuplicateObject(object.name.clone()));
            }
            if !rooms.contains(object.location.as_str()) {
                return Err(WorldError::UnknownObjectRoom {
                    object: object.name.clone(),
                    room: object.location.clone(),
                });
            }
        }

        if !rooms.contains(self.start.as_str()) {
            return Err(WorldError::UnknownStart(self.start.clone()));
        }

        if let Some(writable) = &self.writable {
            if !objects.contains(writable.as_str()) {
                return Err(WorldError::UnknownWritable(writable.clone()));
            }
        }

        Ok(())
    }
}

/// A node of the navigation graph.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    pub description: String,
    exits: Vec<(String, String)>,
}

impl Room {
    /// Exit keywords paired with their destination, in authoring order.
    pub fn exits(&self) -> impl Iterator<Item = (&str, &str)> {
        self.exits.iter().map(|(k, to)| (k.as_str(), to.as_str()))
    }
}

/// Read-only room graph. Built once from validated data.
#[derive(Debug, Clone, Default)]
pub struct WorldGraph {
    rooms: Vec<Room>,
}

impl WorldGraph {
    pub fn from_rooms(rooms: &[RoomData]) -> Self {
        let rooms = rooms
            .iter()
            .map(|r| Room {
                name: r.name.clone(),
                description: r.description.clone(),
                exits: r
                    .exits
                    .iter()
                    .map(|e| (e.keyword.clone(), e.to.clone()))
                    .collect(),
            })
            .collect();
        Self { rooms }
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.room(name).is_some()
    }

    pub fn describe(&self, room: &str) -> Option<&str> {
        self.room(room).map(|r| r.description.as_str())
    }

    pub fn exits(&self, room: &str) -> Vec<(&str, &str)> {
        self.room(room).map(|r| r.exits().collect()).unwrap_or_default()
    }

    pub fn resolve_exit(&self, room: &str, keyword: &str) -> Option<&str> {
        self.room(room)?
            .exits()
            .find(|(k, _)| *k == keyword)
            .map(|(_, to)| to)
    }

    pub fn room_names(&self) -> impl Iterator<Item = &str> {
        self.rooms.iter().map(|r| r.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> WorldData {
        WorldData {
            name: "test".into(),
            start: "A".into(),
            writable: None,
            banner: String::new(),
            welcome: String::new(),
            rooms: vec![
                RoomData {
                    name: "A".into(),
                    description: "Room A".into(),
                    exits: vec![ExitData { keyword: "east".into(), to: "B".into() }],
                },
                RoomData {
                    name: "B".into(),
                    description: "Room B".into(),
                    exits: vec![ExitData { keyword: "west".into(), to: "A".into() }],
                },
            ],
            objects: vec![],
        }
    }

    #[test]
    fn resolves_exits_and_reports_missing_ones() {
        let graph = WorldGraph::from_rooms(&two_rooms().rooms);
        assert_eq!(graph.resolve_exit("A", "east"), Some("B"));
        assert_eq!(graph.resolve_exit("A", "west"), None);
        assert_eq!(graph.resolve_exit("nowhere", "east"), None);
        assert_eq!(graph.describe("B"), Some("Room B"));
        assert_eq!(graph.exits("A"), vec![("east", "B")]);
    }

    #[test]
    fn rejects_dangling_exit() {
        let mut data = two_rooms();
        data.rooms[1].exits.push(ExitData { keyword: "up".into(), to: "Attic".into() });
        assert!(matches!(
            data.validate(),
            Err(WorldError::DanglingExit { ref target, .. }) if target == "Attic"
        ));
    }

    #[test]
    fn rejects_unknown_start_and_object_rooms() {
        let mut data = two_rooms();
        data.start = "C".into();
        assert!(matches!(data.validate(), Err(WorldError::UnknownStart(_))));

        let mut data = two_rooms();
        data.objects.push(ObjectData {
            name: "lamp".into(),
            description: "A lamp.".into(),
            portable: true,
            location: "Cellar".into(),
        });
        assert!(matches!(data.validate(), Err(WorldError::UnknownObjectRoom { .. })));
    }

    #[test]
    fn rejects_unknown_writable_and_duplicates() {
        let mut data = two_rooms();
        data.writable = Some("slate".into());
        assert!(matches!(data.validate(), Err(WorldError::UnknownWritable(_))));

        let mut data = two_rooms();
        data.rooms.push(data.rooms[0].clone());
        assert!(matches!(data.validate(), Err(WorldError::DuplicateRoom(_))));
    }

    #[test]
    fn parses_json_with_defaults() {
        let text = r#"{
            "name": "tiny",
            "start": "Hall",
            "rooms": [{ "name": "Hall", "description": "A hall." }]
        }"#;
        let data = WorldData::from_json(text).unwrap();
        assert!(data.objects.is_empty());
        assert!(data.writable.is_none());
        assert!(data.rooms[0].exits.is_empty());
    }
}
