//! Readers for genie engine assets.
//!
//! The format crates are re-exported here alongside the shared config and batch decoding.
pub mod batch;
pub mod config;

pub use byte_writer;
pub use dat;
pub use dds;
pub use palette;
pub use serial;
pub use smp;

pub use batch::decode_frames;
