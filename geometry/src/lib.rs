#![deny(clippy::all)]

//! Geographic locations and the street maps which connect them.

pub mod bounds;
pub mod location;
pub mod streetmap;

pub use bounds::Bounds;
pub use location::Location;
pub use streetmap::{MapError, Road, StreetMap};

/// Data type used for coordinates, in degrees.
pub type Degrees = f64;
