//! Core data model for legends.
//!
//! This module defines the canonical in-memory representation of a campaign
//! project: geometry value types, image references, the fictional-calendar
//! time model, map elements, hierarchical notes, and the top-level project
//! aggregate.
//!
//! # Design Principles
//!
//! 1. **One wire format**: every entity serializes to the same JSON shape it
//!    deserializes from, via serde. Where the shape is asymmetric on purpose
//!    (image metadata, note parent links, timerange lengths), a custom impl
//!    spells the asymmetry out rather than hiding it.
//!
//! 2. **Non-owning back-references as ids/indices**: note parents and the
//!    calendar's leap unit are stored as plain ids or indices into the owning
//!    collection, never as a second owning pointer.
//!
//! 3. **Permissive construction**: timestamps and rotations are not checked
//!    against the active calendar at construction time; validation reports
//!    suspicious data instead of refusing to represent it.
//!
//! # Example
//!
//! ```
//! use legends::model::{Calendar, Timerange, Timestamp};
//!
//! let calendar = Calendar::earthlike();
//! let range = Timerange::with_calendar(
//!     Timestamp::new(1, 1, 1024),
//!     Timestamp::new(15, 3, 1024),
//!     &calendar,
//! );
//! assert!(range.length > 0);
//! ```

mod calendar;
mod geometry;
mod image;
pub mod io_json;
mod map;
mod note;
mod project;
mod text;
mod time;

#[cfg(test)]
pub(crate) use image::test_support as image_fixture;

// Re-export core types for convenient access
pub use calendar::{Calendar, TimeUnit, TimeUnitChain, UnitSummary};
pub use geometry::{Location, Scale};
pub use image::LegendsImage;
pub use map::{MapAzgaarElement, MapElement, MapElementBase, MapImageElement};
pub use note::{Note, Tag};
pub use project::{Project, Settings};
pub use text::{Description, PlainText, RenderText};
pub use time::{Timerange, Timestamp, UNKNOWN_LENGTH};
