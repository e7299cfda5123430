//! Hierarchical, time-stamped annotations.
//!
//! Notes form a tree: each note owns its children and carries a non-owning
//! parent back-reference stored as a plain note id. On the wire the tree is
//! purely nested; `parent_id` is written alongside for anyone inspecting the
//! file, but reconstruction never reads it — parent links are rebuilt from
//! nesting alone, so an inconsistent `parent_id` cannot corrupt a tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::geometry::Location;
use super::image::LegendsImage;
use super::text::Description;
use super::time::Timerange;

/// A label attached to notes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    /// Packed 0xRRGGBB color.
    pub color: u32,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(id: u64, name: impl Into<String>, color: u32) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }
}

/// A note pinned to a place and a span of time.
///
/// Ids are caller-assigned and expected to be unique within a project; the
/// note itself does not enforce that (the validator does).
#[derive(Clone, Debug, PartialEq)]
pub struct Note {
    pub id: u64,
    pub location: Location,
    pub timerange: Timerange,
    pub description: Description,
    pub thumbnail: LegendsImage,
    pub attached_images: Vec<LegendsImage>,
    /// Id of the enclosing note. Non-owning back-reference maintained by
    /// the tree-building methods and the deserializer.
    parent: Option<u64>,
    pub children: Vec<Note>,
    pub tags: Vec<Tag>,
}

impl Note {
    /// Creates a leaf note with no parent, children, tags, or attachments.
    pub fn new(
        id: u64,
        location: Location,
        timerange: Timerange,
        description: Description,
        thumbnail: LegendsImage,
    ) -> Self {
        Self {
            id,
            location,
            timerange,
            description,
            thumbnail,
            attached_images: Vec::new(),
            parent: None,
            children: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the tags.
    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the attached images.
    pub fn with_attached_images(mut self, images: Vec<LegendsImage>) -> Self {
        self.attached_images = images;
        self
    }

    /// Sets the children, rewiring each child's parent to this note.
    pub fn with_children(mut self, children: Vec<Note>) -> Self {
        self.children = children;
        for child in &mut self.children {
            child.parent = Some(self.id);
        }
        self
    }

    /// Appends a child, rewiring its parent to this note.
    pub fn add_child(&mut self, mut child: Note) {
        child.parent = Some(self.id);
        self.children.push(child);
    }

    /// Appends an attached image.
    pub fn attach_image(&mut self, image: LegendsImage) {
        self.attached_images.push(image);
    }

    /// Id of the enclosing note, if any.
    pub fn parent_id(&self) -> Option<u64> {
        self.parent
    }

    /// Flat id-to-note view over this subtree, for resolving
    /// cross-references from outside the tree. Later duplicates of an id win,
    /// mirroring a last-registered-wins registry; the validator reports
    /// duplicates.
    pub fn registry(&self) -> BTreeMap<u64, &Note> {
        let mut map = BTreeMap::new();
        self.collect_into(&mut map);
        map
    }

    fn collect_into<'a>(&'a self, map: &mut BTreeMap<u64, &'a Note>) {
        map.insert(self.id, self);
        for child in &self.children {
            child.collect_into(map);
        }
    }
}

#[derive(Serialize)]
struct NoteWireRef<'a> {
    id: u64,
    location: &'a Location,
    timerange: &'a Timerange,
    description: &'a Description,
    thumbnail: &'a LegendsImage,
    attached_images: &'a [LegendsImage],
    parent_id: Option<u64>,
    children: &'a [Note],
    tags: &'a [Tag],
}

impl Serialize for Note {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NoteWireRef {
            id: self.id,
            location: &self.location,
            timerange: &self.timerange,
            description: &self.description,
            thumbnail: &self.thumbnail,
            attached_images: &self.attached_images,
            parent_id: self.parent,
            children: &self.children,
            tags: &self.tags,
        }
        .serialize(serializer)
    }
}

/// Wire shape of a note. `parent_id` is deliberately not a field here: the
/// deserializer rebuilds parent links from nesting and ignores whatever the
/// file claims.
#[derive(Deserialize)]
struct NoteWire {
    id: u64,
    location: Location,
    timerange: Timerange,
    description: Description,
    thumbnail: LegendsImage,
    #[serde(default)]
    attached_images: Vec<LegendsImage>,
    #[serde(default)]
    children: Vec<Note>,
    #[serde(default)]
    tags: Vec<Tag>,
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = NoteWire::deserialize(deserializer)?;
        // Each child's own subtree was already rewired by its Deserialize;
        // only the immediate children need their parent set here.
        let mut children = wire.children;
        for child in &mut children {
            child.parent = Some(wire.id);
        }
        Ok(Note {
            id: wire.id,
            location: wire.location,
            timerange: wire.timerange,
            description: wire.description,
            thumbnail: wire.thumbnail,
            attached_images: wire.attached_images,
            parent: None,
            children,
            tags: wire.tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::image::test_support::write_dummy_bmp;
    use crate::model::{Timerange, Timestamp};
    use std::path::Path;

    fn sample_note(id: u64, text: &str, thumb: &Path) -> Note {
        Note::new(
            id,
            Location::new(id as f64, 0.0, 0.0),
            Timerange::new(Timestamp::new(1, 1, 1020), Timestamp::new(5, 1, 1020)),
            Description::new(text),
            LegendsImage::open(thumb.to_string_lossy()).expect("open thumbnail"),
        )
    }

    #[test]
    fn building_a_tree_wires_parent_ids() {
        let temp = tempfile::tempdir().expect("tempdir");
        let thumb = temp.path().join("thumb.bmp");
        write_dummy_bmp(&thumb, 4, 4);

        let mut root = sample_note(1, "root", &thumb);
        root.add_child(sample_note(2, "child", &thumb));
        let root = root.with_children(vec![
            sample_note(3, "first", &thumb),
            sample_note(4, "second", &thumb),
        ]);

        assert_eq!(root.parent_id(), None);
        assert!(root.children.iter().all(|c| c.parent_id() == Some(1)));
    }

    #[test]
    fn attach_image_appends() {
        let temp = tempfile::tempdir().expect("tempdir");
        let thumb = temp.path().join("thumb.bmp");
        write_dummy_bmp(&thumb, 4, 4);

        let mut note = sample_note(9, "images", &thumb);
        assert!(note.attached_images.is_empty());
        note.attach_image(LegendsImage::open(thumb.to_string_lossy()).expect("open"));
        assert_eq!(note.attached_images.len(), 1);
    }

    #[test]
    fn two_level_tree_roundtrips_with_parent_links() {
        let temp = tempfile::tempdir().expect("tempdir");
        let thumb = temp.path().join("thumb.bmp");
        write_dummy_bmp(&thumb, 4, 4);

        let grandchild = sample_note(30, "grandchild", &thumb);
        let child = sample_note(20, "child", &thumb).with_children(vec![grandchild]);
        let root = sample_note(10, "root", &thumb)
            .with_children(vec![child])
            .with_tags(vec![Tag::new(1, "lore", 0x00FF_0000)]);

        let json = serde_json::to_string(&root).expect("serialize note");
        let restored: Note = serde_json::from_str(&json).expect("parse note");

        assert_eq!(restored, root);
        assert_eq!(restored.children[0].parent_id(), Some(10));
        assert_eq!(restored.children[0].children[0].parent_id(), Some(20));
        assert_eq!(restored.children[0].children[0].description.text, "grandchild");
    }

    #[test]
    fn stored_parent_id_is_written_but_never_read() {
        let temp = tempfile::tempdir().expect("tempdir");
        let thumb = temp.path().join("thumb.bmp");
        write_dummy_bmp(&thumb, 4, 4);

        let root = sample_note(10, "root", &thumb).with_children(vec![sample_note(
            20, "child", &thumb,
        )]);

        let mut value = serde_json::to_value(&root).expect("serialize note");
        assert_eq!(value["parent_id"], serde_json::Value::Null);
        assert_eq!(value["children"][0]["parent_id"], 10);

        // Lie about both parents; nesting wins.
        value["parent_id"] = 999.into();
        value["children"][0]["parent_id"] = 999.into();
        let restored: Note = serde_json::from_value(value).expect("parse note");
        assert_eq!(restored.parent_id(), None);
        assert_eq!(restored.children[0].parent_id(), Some(10));
    }

    #[test]
    fn registry_flattens_the_subtree() {
        let temp = tempfile::tempdir().expect("tempdir");
        let thumb = temp.path().join("thumb.bmp");
        write_dummy_bmp(&thumb, 4, 4);

        let root = sample_note(1, "root", &thumb).with_children(vec![
            sample_note(2, "a", &thumb).with_children(vec![sample_note(4, "a1", &thumb)]),
            sample_note(3, "b", &thumb),
        ]);

        let registry = root.registry();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry[&4].description.text, "a1");
        assert_eq!(registry[&4].parent_id(), Some(2));
    }
}
