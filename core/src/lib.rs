//! Indexing and query engine for the city finder.
//!
//! The engine builds an inverted index over a bulk city dataset and answers
//! two query types: exact-id lookup and diacritic-insensitive prefix search
//! over city names. Dataset acquisition and the HTTP layer live in the
//! server crate; this crate has no network dependency.

pub mod city;
pub mod error;
pub mod index;
pub mod normalize;
pub mod persist;
pub mod store;

pub use city::{City, Coord};
pub use error::Error;
pub use index::Index;
pub use store::{CityIndex, Connection};
