//! Image references with cached metadata.
//!
//! A [`LegendsImage`] never holds pixel data; it records where an image file
//! lives plus the dimensions and file type probed from its header. The path
//! is the source of truth: serialization writes the cached metadata for
//! anyone reading the project file, but reconstruction re-probes the file and
//! ignores the stored values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LegendsError;

/// Metadata wrapper around an image file on disk.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendsImage {
    /// Path to the image file. The only field that survives a round trip
    /// verbatim; everything else is re-derived from it.
    pub path: String,

    /// Width in pixels, probed from the file header.
    pub width: u32,

    /// Height in pixels, probed from the file header.
    pub height: u32,

    /// Lowercased file extension without the leading dot (e.g. "png").
    pub file_type: String,
}

impl LegendsImage {
    /// Opens an image reference by probing the file at `path`.
    ///
    /// Only the header is read; pixel data is never decoded. A missing or
    /// unrecognized file propagates as [`LegendsError::ImageProbe`].
    pub fn open(path: impl Into<String>) -> Result<Self, LegendsError> {
        let path = path.into();
        let size = imagesize::size(&path).map_err(|source| LegendsError::ImageProbe {
            path: Path::new(&path).to_path_buf(),
            source,
        })?;

        let file_type = file_type_of(&path);

        Ok(Self {
            width: size.width as u32,
            height: size.height as u32,
            file_type,
            path,
        })
    }
}

/// Returns the lowercased extension of `path` without the leading dot, or an
/// empty string when there is none.
fn file_type_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Wire shape of a serialized image. Width, height, and file type are also
/// present on the wire but deliberately not listed here: deserialization
/// trusts only the path and re-probes the rest.
#[derive(Deserialize)]
struct ImageWire {
    path: String,
}

impl<'de> Deserialize<'de> for LegendsImage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ImageWire::deserialize(deserializer)?;
        LegendsImage::open(wire.path).map_err(serde::de::Error::custom)
    }
}
