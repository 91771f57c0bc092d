//! Typed object properties
//!
//! The generic property editor works through this table instead of
//! string-keyed property bags: each variant binds a property name to the
//! field it reads and writes, so an unsupported property on a target is a
//! type-level miss, not a runtime string lookup failure.

use glam::Vec3;
use parcour_model::{LocationKind, ParcourObject};
use serde::{Deserialize, Serialize};

/// A property name together with a value to assign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Property {
    Name(String),
    Location(Vec3),
    Kind(LocationKind),
    Density(f32),
}

impl Property {
    pub fn key(&self) -> &'static str {
        match self {
            Property::Name(_) => "name",
            Property::Location(_) => "location",
            Property::Kind(_) => "kind",
            Property::Density(_) => "density",
        }
    }

    /// Current value of this property on `object`, as the same variant.
    /// None when the object kind doesn't carry the property.
    pub fn read(&self, object: &ParcourObject) -> Option<Property> {
        match self {
            Property::Name(_) => Some(Property::Name(object.name().to_string())),
            Property::Location(_) => Some(Property::Location(object.location())),
            Property::Kind(_) => match object {
                ParcourObject::Location(marker) => Some(Property::Kind(marker.kind)),
                _ => None,
            },
            Property::Density(_) => match object {
                ParcourObject::DynamicObject(body) => Some(Property::Density(body.density)),
                _ => None,
            },
        }
    }

    /// Assign the carried value to `object`; false when unsupported there
    pub fn write(&self, object: &mut ParcourObject) -> bool {
        match self {
            Property::Name(name) => {
                object.set_name(name.clone());
                true
            }
            Property::Location(location) => {
                object.set_location(*location);
                true
            }
            Property::Kind(kind) => match object {
                ParcourObject::Location(marker) => {
                    marker.kind = *kind;
                    true
                }
                _ => false,
            },
            Property::Density(density) => match object {
                ParcourObject::DynamicObject(body) => {
                    body.density = *density;
                    true
                }
                _ => false,
            },
        }
    }
}
