/// Interactive objects and where they currently are
use crate::core::session::SessionId;
use crate::core::world::ObjectData;
use crate::error::CommandError;

/// Where an object is: lying in a room, or carried by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Room(String),
    Carried(SessionId),
}

#[derive(Debug, Clone)]
pub struct Object {
    pub name: String,
    pub description: String,
    pub portable: bool,
    pub location: Location,
}

/// Catalog of every object in the world, in authoring order.
///
/// Objects are never created or destroyed after load; only their location
/// and, for the writable one, their description change.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    objects: Vec<Object>,
}

impl ObjectRegistry {
    pub fn from_catalog(catalog: &[ObjectData]) -> Self {
        let objects = catalog
            .iter()
            .map(|o| Object {
                name: o.name.clone(),
                description: o.description.clone(),
                portable: o.portable,
                location: Location::Room(o.location.clone()),
            })
            .collect();
        Self { objects }
    }

    pub fn lookup(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|o| o.name == name)
    }

    fn lookup_mut(&mut self, name: &str) -> Option<&mut Object> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    /// True only when the object lies directly in `room`; carried objects are
    /// never "here", even if their holder is.
    pub fn is_here(&self, name: &str, room: &str) -> bool {
        self.lookup(name)
            .is_some_and(|o| matches!(&o.location, Location::Room(r) if r == room))
    }

    /// Objects lying directly in `room`, in catalog order.
    pub fn in_room<'a>(&'a self, room: &'a str) -> impl Iterator<Item = &'a Object> + 'a {
        self.objects
            .iter()
            .filter(move |o| matches!(&o.location, Location::Room(r) if r == room))
    }

    /// Objects carried by `holder`, in catalog order.
    pub fn carried_by(&self, holder: SessionId) -> impl Iterator<Item = &Object> + '_ {
        self.objects
            .iter()
            .filter(move |o| o.location == Location::Carried(holder))
    }

    /// Moves `name` from `room` into the hands of `holder`.
    pub fn take(&mut self, name: &str, holder: SessionId, room: &str) -> Result<(), CommandError> {
        let object = self
            .lookup_mut(name)
            .ok_or_else(|| CommandError::NoSuchObject(name.to_string()))?;
        if !matches!(&object.location, Location::Room(r) if r == room) {
            return Err(CommandError::NotHere(name.to_string()));
        }
        if !object.portable {
            return Err(CommandError::NotPortable(name.to_string()));
        }
        object.location = Location::Carried(holder);
        Ok(())
    }

    /// Puts an object carried by `holder` down in `room`.
    pub fn drop(&mut self, name: &str, holder: SessionId, room: &str) -> Result<(), CommandError> {
        match self.lookup_mut(name) {
            Some(object) if object.location == Location::Carried(holder) => {
                object.location = Location::Room(room.to_string());
                Ok(())
            }
            _ => Err(CommandError::NotCarried(name.to_string())),
        }
    }

    /// Drops everything `holder` carries into `room`. Returns how many moved.
    pub fn release_all(&mut self, holder: SessionId, room: &str) -> usize {
        let mut moved = 0;
        for object in self
            .objects
            .iter_mut()
            .filter(|o| o.location == Location::Carried(holder))
        {
            object.location = Location::Room(room.to_string());
            moved += 1;
        }
        moved
    }

    /// Unconditionally replaces an object's description.
    pub fn rewrite_description(&mut self, name: &str, text: String) -> Result<(), CommandError> {
        let object = self
            .lookup_mut(name)
            .ok_or_else(|| CommandError::NoSuchObject(name.to_string()))?;
        object.description = text;
        Ok(())
    }
}
