//! Row based run length decoding of the SMP command table.
//!
//! Each non-empty row is a list of command bytes ended by [`END_OF_ROW`]. The low two bits
//! of a command pick the run kind, the rest is the run length minus one.
use serial::ByteReader;

use crate::{error::SmpError, SmpFrame, SmpPixel, SmpPlayerColorPixel};

pub const TRANSPARENT_ROW: u16 = 0xFFFF;
pub const END_OF_ROW: u8 = 0x03;
/// Widest row the u16 edge tables can describe.
pub const MAX_WIDTH: u32 = TRANSPARENT_ROW as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmpCommand {
    Skip(u32),
    Colors(u32),
    /// Intensity bytes first, then the pixels.
    PlayerColors(u32),
    EndOfRow,
}

impl SmpCommand {
    pub fn from_byte(command: u8, row: u32) -> Result<Self, SmpError> {
        if command == END_OF_ROW {
            return Ok(SmpCommand::EndOfRow);
        }

        let count = (command >> 2) as u32 + 1;

        match command & 0b11 {
            0 => Ok(SmpCommand::Skip(count)),
            1 => Ok(SmpCommand::Colors(count)),
            2 => Ok(SmpCommand::PlayerColors(count)),
            _ => Err(SmpError::InvalidCommand { row, command }),
        }
    }
}

/// Decodes the command table of `frame` into its pixel buffer and player color overlay.
///
/// Header and edge tables must already be read. The reader is moved to
/// `base + cmd_table_offset` and from there only moves forward. A frame that yields no pixel
/// at all is collapsed to 0x0.
pub fn decode(frame: &mut SmpFrame, reader: &mut ByteReader) -> Result<(), SmpError> {
    let width = frame.header.width;
    let height = frame.header.height;
    let stride = width as usize;

    let too_large = || SmpError::FrameTooLarge { width, height };

    if width > MAX_WIDTH {
        return Err(too_large());
    }

    let len = stride.checked_mul(height as usize).ok_or_else(too_large)?;

    let mut pixels = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| too_large())?;
    pixels.resize(len, SmpPixel::default());

    frame.pixels = pixels;
    frame.player_color_overlay.clear();

    reader.seek(frame.base + frame.header.cmd_table_offset as usize);

    let mut pixels_read = 0usize;

    let rows = frame
        .left_edges
        .iter()
        .zip(frame.right_edges.iter())
        .take(height as usize)
        .enumerate();

    for (row, (&left, &right)) in rows {
        let row = row as u32;

        // not even a terminator is stored for these
        if left == TRANSPARENT_ROW || right == TRANSPARENT_ROW {
            continue;
        }

        let mut col = left as u32;

        loop {
            let command = SmpCommand::from_byte(reader.read::<u8>()?, row)?;

            let count = match command {
                SmpCommand::EndOfRow => break,
                SmpCommand::Skip(count) => {
                    if col + count > width {
                        return Err(SmpError::PixelOutOfBounds {
                            row,
                            col,
                            count,
                            width,
                        });
                    }

                    col += count;
                    count
                }
                SmpCommand::Colors(count) => {
                    if col + count > width {
                        return Err(SmpError::PixelOutOfBounds {
                            row,
                            col,
                            count,
                            width,
                        });
                    }

                    let start = row as usize * stride + col as usize;

                    for pixel in &mut frame.pixels[start..start + count as usize] {
                        *pixel = reader.read::<SmpPixel>()?;
                    }

                    col += count;
                    count
                }
                SmpCommand::PlayerColors(count) => {
                    if col + count > width {
                        return Err(SmpError::OverlayOutOfBounds {
                            row,
                            col,
                            count,
                            width,
                        });
                    }

                    // intensity bytes, superseded by the full pixels that follow
                    reader.skip(count as usize)?;

                    for _ in 0..count {
                        let pixel = reader.read::<SmpPixel>()?;

                        frame.player_color_overlay.push(SmpPlayerColorPixel {
                            x: col,
                            y: row,
                            pixel,
                        });

                        col += 1;
                    }

                    count
                }
            };

            pixels_read += count as usize;
        }
    }

    if pixels_read == 0 {
        log::warn!(
            "SMP frame at {} declares {width}x{height} but has no pixels, treating it as empty",
            frame.base
        );

        frame.header.width = 0;
        frame.header.height = 0;
        frame.pixels.clear();
        frame.left_edges.clear();
        frame.right_edges.clear();
    }

    log::debug!(
        "Decoded SMP frame at {}: {}x{}, {} runs worth of pixels, {} player color pixels",
        frame.base,
        frame.header.width,
        frame.header.height,
        pixels_read,
        frame.player_color_overlay.len()
    );

    Ok(())
}
