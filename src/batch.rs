//! Decoding many frames of one sprite file at once.
use rayon::prelude::*;
use serial::FormatVersion;
use smp::{SmpError, SmpFrame};

/// Decodes the frame at every offset in parallel.
///
/// Each frame gets its own reader over `bytes`, so one broken frame does not stop the others.
/// Results come back in the order of `offsets`.
pub fn decode_frames(
    bytes: &[u8],
    offsets: &[usize],
    version: FormatVersion,
) -> Vec<Result<SmpFrame, SmpError>> {
    offsets
        .par_iter()
        .map(|&offset| SmpFrame::open_at(bytes, offset, version))
        .collect()
}
