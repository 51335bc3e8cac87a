//! Card system: definitions and the card pool.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card
//! - `CardKind`: Content-defined category, or the reserved `special` type
//! - `Card`: Type tag, one effect per direction, presentation text
//! - `CardPool`: Ordinary cards by index, special cards by id

pub mod definition;
pub mod registry;

pub use definition::{Card, CardId, CardKind, CardText};
pub use registry::CardPool;
