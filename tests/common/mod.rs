#![allow(dead_code)]

use std::fs;
use std::path::Path;

use legends::model::{
    Calendar, Description, LegendsImage, Location, MapAzgaarElement, MapElement, MapElementBase,
    MapImageElement, Note, Project, Scale, Settings, Tag, Timerange, Timestamp,
};

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

pub fn open_image(path: &Path) -> LegendsImage {
    LegendsImage::open(path.to_string_lossy()).expect("open image")
}

pub fn sample_note(id: u64, text: &str, thumb: &Path) -> Note {
    Note::new(
        id,
        Location::new(id as f64 * 10.0, 0.0, 0.0),
        Timerange::new(Timestamp::new(1, 1, 1020), Timestamp::new(10, 2, 1020)),
        Description::new(text),
        open_image(thumb),
    )
}

/// Builds a full campaign project under `root`: one image element, one
/// Azgaar element, and a two-level note tree with tags and an attachment.
pub fn sample_project(root: &Path) -> Project {
    let banner = root.join("images/banner.bmp");
    let thumb = root.join("images/thumb.bmp");
    write_bmp(&banner, 48, 24);
    write_bmp(&thumb, 8, 8);

    let mut project = Project::new(1, "Westmarch", Settings::new(Calendar::earthlike()));

    project.insert_map_element(MapElement::Image(MapImageElement {
        base: MapElementBase::new(
            100,
            Location::new(12.0, 34.0, 0.0),
            Scale::new(1.0, 1.0, 1.0),
            15.0,
        ),
        image: open_image(&banner),
    }));
    project.insert_map_element(MapElement::Azgaar(MapAzgaarElement {
        base: MapElementBase::new(101, Location::default(), Scale::default(), 0.0),
        json_path: "exports/westmarch.json".to_string(),
    }));

    let grandchild = sample_note(12, "The siege begins", &thumb);
    let mut child = sample_note(11, "Second age", &thumb).with_children(vec![grandchild]);
    child.attach_image(open_image(&banner));
    let root_note = sample_note(10, "Founding of Westmarch", &thumb)
        .with_children(vec![child])
        .with_tags(vec![
            Tag::new(1, "history", 0x00AA_5500),
            Tag::new(2, "war", 0x00FF_0000),
        ]);
    project.insert_note(root_note);

    project
}
