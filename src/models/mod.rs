//! Data models for the deck advisor service.
//!
//! Wire shapes of the snapshot service, normalized decks and REST request/response bodies.

mod archetype;
mod card;
mod deck;
mod import;

pub use archetype::*;
pub use card::*;
pub use deck::*;
pub use import::*;
