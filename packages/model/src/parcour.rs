//! The parcour document
//!
//! A flat, ordered collection of objects. All lookups go through the
//! document by id; nothing in the model holds a reference to another
//! object, so area elements can never form ownership cycles with their
//! areas.

use crate::{ModelError, ParcourObject, RoomArea};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcour {
    pub name: String,
    objects: Vec<ParcourObject>,
}

impl Parcour {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn objects(&self) -> &[ParcourObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.iter().any(|o| o.id() == id)
    }

    pub fn object(&self, id: &str) -> Option<&ParcourObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn object_mut(&mut self, id: &str) -> Option<&mut ParcourObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// The room with the given id, if the id resolves to an area
    pub fn room(&self, id: &str) -> Option<&RoomArea> {
        self.object(id).and_then(ParcourObject::as_room)
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut RoomArea> {
        self.object_mut(id).and_then(ParcourObject::as_room_mut)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &RoomArea> {
        self.objects.iter().filter_map(ParcourObject::as_room)
    }

    /// Elements whose `area_id` references the given area
    pub fn elements_of_area<'a>(
        &'a self,
        area_id: &'a str,
    ) -> impl Iterator<Item = &'a ParcourObject> {
        self.objects
            .iter()
            .filter(move |o| o.area_id() == Some(area_id))
    }

    /// Append an object; ids must be unique within the document
    pub fn add(&mut self, object: ParcourObject) -> Result<(), ModelError> {
        if self.contains(object.id()) {
            return Err(ModelError::DuplicateId(object.id().to_string()));
        }
        self.objects.push(object);
        Ok(())
    }

    /// Remove an object by id, returning it
    pub fn remove(&mut self, id: &str) -> Result<ParcourObject, ModelError> {
        let index = self
            .objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or_else(|| ModelError::ObjectNotFound(id.to_string()))?;
        Ok(self.objects.remove(index))
    }

    /// Serialize the document to JSON
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a document from JSON
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }
}
