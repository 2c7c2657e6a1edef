//! Character entity - aggregate root for one character sheet
//!
//! A character owns two ordered lists of embedded records: named attributes
//! (value plus optional ceiling) and inventory items. Embedded records are
//! addressed only through their parent; their ids are assigned once at
//! creation and survive any later edit. Editing a record never moves it,
//! and removal takes out exactly one record without reordering the rest.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AttributeId, CharacterId, ItemId};

/// Sentinel avatar value meaning "no uploaded image, use the default".
pub const NO_AVATAR: &str = "none";

/// A character and its embedded sheet data
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub description: String,
    /// Stored file name of the uploaded avatar, or [`NO_AVATAR`]
    pub avatar: String,
    pub attributes: Vec<Attribute>,
    pub inventory: Vec<Item>,
}

/// A named attribute, e.g. "HP 10/10"
///
/// `maxvalue` is an advisory ceiling; it is never enforced against `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub name: String,
    pub value: String,
    pub maxvalue: Option<f64>,
}

/// An inventory item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            description: description.into(),
            avatar: avatar.into(),
            attributes: Vec::new(),
            inventory: Vec::new(),
        }
    }

    pub fn add_attribute(&mut self, attribute: Attribute) -> AttributeId {
        let id = attribute.id;
        self.attributes.push(attribute);
        id
    }

    /// Replace the mutable fields of an attribute, keeping its id and slot
    pub fn update_attribute(
        &mut self,
        id: AttributeId,
        name: String,
        value: String,
        maxvalue: Option<f64>,
    ) -> bool {
        match find_by_id(&mut self.attributes, |a| a.id == id) {
            Some(attribute) => {
                attribute.name = name;
                attribute.value = value;
                attribute.maxvalue = maxvalue;
                true
            }
            None => false,
        }
    }

    pub fn remove_attribute(&mut self, id: AttributeId) -> bool {
        remove_by_id(&mut self.attributes, |a| a.id == id)
    }

    pub fn add_item(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.inventory.push(item);
        id
    }

    /// Replace the mutable fields of an item, keeping its id and slot
    pub fn update_item(&mut self, id: ItemId, name: String, description: Option<String>) -> bool {
        match find_by_id(&mut self.inventory, |i| i.id == id) {
            Some(item) => {
                item.name = name;
                item.description = description;
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, id: ItemId) -> bool {
        remove_by_id(&mut self.inventory, |i| i.id == id)
    }
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>, maxvalue: Option<f64>) -> Self {
        Self {
            id: AttributeId::new(),
            name: name.into(),
            value: value.into(),
            maxvalue,
        }
    }
}

impl Item {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            description,
        }
    }
}

// Both embedded lists share one addressing algorithm: linear scan by id,
// in-place edit, positional removal.

fn find_by_id<T>(list: &mut [T], matches: impl Fn(&T) -> bool) -> Option<&mut T> {
    list.iter_mut().find(|record| matches(record))
}

fn remove_by_id<T>(list: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    if let Some(pos) = list.iter().position(|record| matches(record)) {
        list.remove(pos);
        true
    } else {
        false
    }
}
