//! Integration tests for project-level JSON persistence.

use legends::model::io_json::{from_json_str, read_project_json, to_json_string, write_project_json};
use legends::model::MapElement;
use legends::validation::validate_project;

mod common;

#[test]
fn project_file_roundtrip_reproduces_the_project() {
    let temp = tempfile::tempdir().expect("tempdir");
    let project = common::sample_project(temp.path());

    let path = temp.path().join("westmarch.json");
    write_project_json(&path, &project).expect("write project");
    let restored = read_project_json(&path).expect("read project");

    assert_eq!(restored, project);
    assert!(validate_project(&restored).is_clean());
}

#[test]
fn string_roundtrip_preserves_note_tree_shape() {
    let temp = tempfile::tempdir().expect("tempdir");
    let project = common::sample_project(temp.path());

    let json = to_json_string(&project).expect("serialize project");
    let restored = from_json_str(&json).expect("parse project");

    let root = &restored.notes[&10];
    assert_eq!(root.parent_id(), None);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].parent_id(), Some(10));
    assert_eq!(root.children[0].children[0].parent_id(), Some(11));
    assert_eq!(root.tags.len(), 2);

    let registry = restored.note_registry();
    assert_eq!(registry.len(), 3);
    assert_eq!(registry[&12].description.text, "The siege begins");
}

#[test]
fn map_element_variants_survive_the_roundtrip() {
    let temp = tempfile::tempdir().expect("tempdir");
    let project = common::sample_project(temp.path());

    let json = to_json_string(&project).expect("serialize project");
    let restored = from_json_str(&json).expect("parse project");

    assert!(matches!(restored.map_elements[&100], MapElement::Image(_)));
    assert!(matches!(restored.map_elements[&101], MapElement::Azgaar(_)));
}

#[test]
fn image_metadata_is_reprobed_from_disk_on_read() {
    let temp = tempfile::tempdir().expect("tempdir");
    let project = common::sample_project(temp.path());

    let path = temp.path().join("westmarch.json");
    write_project_json(&path, &project).expect("write project");

    // Replace the banner with a different size; the stored metadata in the
    // project file is now stale and must lose.
    common::write_bmp(&temp.path().join("images/banner.bmp"), 96, 12);

    let restored = read_project_json(&path).expect("read project");
    match &restored.map_elements[&100] {
        MapElement::Image(element) => {
            assert_eq!(element.image.width, 96);
            assert_eq!(element.image.height, 12);
        }
        other => panic!("expected image element, got {other:?}"),
    }
}

#[test]
fn read_fails_when_a_referenced_image_is_missing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let project = common::sample_project(temp.path());

    let path = temp.path().join("westmarch.json");
    write_project_json(&path, &project).expect("write project");
    std::fs::remove_file(temp.path().join("images/thumb.bmp")).expect("remove thumbnail");

    read_project_json(&path).expect_err("missing image must fail the load");
}

#[test]
fn timerange_lengths_come_back_as_the_sentinel() {
    let temp = tempfile::tempdir().expect("tempdir");
    let mut project = common::sample_project(temp.path());

    // Give the stored range a real length before writing.
    let calendar = project.settings.calendar.clone();
    if let Some(note) = project.notes.get_mut(&10) {
        note.timerange.recompute_length(&calendar);
        assert!(note.timerange.length > 0);
    }

    let json = to_json_string(&project).expect("serialize project");
    let restored = from_json_str(&json).expect("parse project");

    // No calendar is threaded through deserialization, so the length is
    // recomputed to the sentinel, not copied.
    assert_eq!(restored.notes[&10].timerange.length, legends::model::UNKNOWN_LENGTH);
}
