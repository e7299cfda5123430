//! Map elements: positioned, scaled, rotated entities placed on a map.
//!
//! Elements are polymorphic over a `"type"` discriminator on the wire, equal
//! to the variant's historical class name. Deserialization dispatches
//! through a discriminator-keyed table, so registering a new variant means
//! adding one row and one struct without touching the existing ones. An
//! unrecognized or missing discriminator falls back to the base shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::geometry::{Location, Scale};
use super::image::LegendsImage;

/// Fields shared by every map element. The rotation unit is whatever the
/// editor wrote; the model stores it verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapElementBase {
    pub id: u64,
    pub location: Location,
    pub scale: Scale,
    pub rotation: f64,
}

impl MapElementBase {
    /// Creates the shared element fields.
    pub fn new(id: u64, location: Location, scale: Scale, rotation: f64) -> Self {
        Self {
            id,
            location,
            scale,
            rotation,
        }
    }
}

/// An image placed on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapImageElement {
    #[serde(flatten)]
    pub base: MapElementBase,
    pub image: LegendsImage,
}

/// A reference to an external Azgaar geographic-data export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapAzgaarElement {
    #[serde(flatten)]
    pub base: MapElementBase,
    pub json_path: String,
}

/// A map element of any variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MapElement {
    #[serde(rename = "MapElement")]
    Base(MapElementBase),
    #[serde(rename = "MapImageElement")]
    Image(MapImageElement),
    #[serde(rename = "MapAzgaarElement")]
    Azgaar(MapAzgaarElement),
}

type DecodeFn = fn(Value) -> Result<MapElement, serde_json::Error>;

/// Discriminator-keyed dispatch table. One row per variant; new variants
/// register here without editing the others.
const VARIANT_DECODERS: &[(&str, DecodeFn)] = &[
    ("MapElement", decode_base),
    ("MapImageElement", |value| {
        serde_json::from_value::<MapImageElement>(value).map(MapElement::Image)
    }),
    ("MapAzgaarElement", |value| {
        serde_json::from_value::<MapAzgaarElement>(value).map(MapElement::Azgaar)
    }),
];

fn decode_base(value: Value) -> Result<MapElement, serde_json::Error> {
    serde_json::from_value::<MapElementBase>(value).map(MapElement::Base)
}

impl MapElement {
    /// Reconstructs an element from its wire form, dispatching on the
    /// `"type"` discriminator. Unknown and missing discriminators decode as
    /// the base shape.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let decode = value
            .get("type")
            .and_then(Value::as_str)
            .and_then(|tag| {
                VARIANT_DECODERS
                    .iter()
                    .find(|(name, _)| *name == tag)
                    .map(|(_, decode)| *decode)
            })
            .unwrap_or(decode_base);
        decode(value)
    }

    /// The shared fields of whichever variant this is.
    pub fn base(&self) -> &MapElementBase {
        match self {
            MapElement::Base(base) => base,
            MapElement::Image(element) => &element.base,
            MapElement::Azgaar(element) => &element.base,
        }
    }

    pub fn id(&self) -> u64 {
        self.base().id
    }

    pub fn location(&self) -> &Location {
        &self.base().location
    }

    pub fn scale(&self) -> &Scale {
        &self.base().scale
    }

    pub fn rotation(&self) -> f64 {
        self.base().rotation
    }

    /// The wire discriminator for this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            MapElement::Base(_) => "MapElement",
            MapElement::Image(_) => "MapImageElement",
            MapElement::Azgaar(_) => "MapAzgaarElement",
        }
    }
}

impl From<MapElementBase> for MapElement {
    fn from(base: MapElementBase) -> Self {
        MapElement::Base(base)
    }
}

impl From<MapImageElement> for MapElement {
    fn from(element: MapImageElement) -> Self {
        MapElement::Image(element)
    }
}

impl From<MapAzgaarElement> for MapElement {
    fn from(element: MapAzgaarElement) -> Self {
        MapElement::Azgaar(element)
    }
}

impl<'de> Deserialize<'de> for MapElement {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        MapElement::from_value(value).map_err(serde::de::Error::custom)
    }
}
