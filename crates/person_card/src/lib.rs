//! Person Card - person lookups with a deterministic fallback
//!
//! A full-name query is looked up through a [`PersonLookup`] collaborator
//! (SearXNG in production). When the lookup yields nothing, a basic card is
//! built from the query itself.

pub mod card;
pub mod config;
pub mod image_probe;
pub mod lookup;
pub mod resolver;
pub mod searx;
pub mod validator;

pub use card::*;
pub use config::*;
pub use image_probe::*;
pub use lookup::*;
pub use resolver::*;
pub use searx::*;
pub use validator::*;
