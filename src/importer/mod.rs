//! Snapshot import pipeline.
//!
//! Fetches the decks and archetype datasets, reconciles them into normalized
//! decks and replaces the importer-owned part of the catalog.

mod archetypes;
mod assembler;
mod classes;
mod decoder;
mod error;
mod pipeline;
mod source;

pub use archetypes::*;
pub use assembler::*;
pub use classes::*;
pub use decoder::*;
pub use error::*;
pub use pipeline::*;
pub use source::*;
