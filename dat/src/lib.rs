//! Records from the empires*.dat game data file.
mod terrain_border;

pub use terrain_border::*;
