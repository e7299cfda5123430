//! The top-level project aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::calendar::Calendar;
use super::map::MapElement;
use super::note::Note;

/// Per-project settings. Currently just the active calendar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub calendar: Calendar,
}

impl Settings {
    /// Creates settings around a calendar.
    pub fn new(calendar: Calendar) -> Self {
        Self { calendar }
    }
}

/// A campaign project: settings plus every map element and note, keyed by id.
///
/// The project owns everything it contains. Keys are expected to match the
/// contained entity's own id; the validator reports mismatches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub settings: Settings,
    #[serde(default)]
    pub map_elements: BTreeMap<u64, MapElement>,
    #[serde(default)]
    pub notes: BTreeMap<u64, Note>,
}

impl Project {
    /// Creates an empty project.
    pub fn new(id: u64, name: impl Into<String>, settings: Settings) -> Self {
        Self {
            id,
            name: name.into(),
            settings,
            map_elements: BTreeMap::new(),
            notes: BTreeMap::new(),
        }
    }

    /// Inserts a map element keyed by its own id, replacing any previous
    /// element under that id.
    pub fn insert_map_element(&mut self, element: MapElement) -> Option<MapElement> {
        self.map_elements.insert(element.id(), element)
    }

    /// Inserts a root note keyed by its own id, replacing any previous note
    /// under that id.
    pub fn insert_note(&mut self, note: Note) -> Option<Note> {
        self.notes.insert(note.id, note)
    }

    /// Flat id-to-note view across every note tree in the project, for
    /// resolving cross-tree references such as a detached `parent_id`.
    pub fn note_registry(&self) -> BTreeMap<u64, &Note> {
        let mut map = BTreeMap::new();
        for note in self.notes.values() {
            let mut subtree = note.registry();
            map.append(&mut subtree);
        }
        map
    }
}
