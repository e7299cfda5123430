//! Legends: the data model for a world-building campaign-notes application.
//!
//! A legends [`model::Project`] collects map elements (images or external
//! geographic-data references placed on a map), hierarchical time-stamped
//! notes with attached images, and a configurable fictional calendar. The
//! crate covers the in-memory model, its invariants, and its JSON round-trip
//! serialization; rendering, image decoding, and any UI live elsewhere.
//!
//! # Modules
//!
//! - [`model`]: Entity types (Project, Note, MapElement, Calendar, etc.)
//! - [`validation`]: Project validation and structured error reporting
//! - [`error`]: Error types for legends operations

pub mod error;
pub mod model;
pub mod validation;

pub use error::LegendsError;
