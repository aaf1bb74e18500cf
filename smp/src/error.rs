use serial::SerialError;

#[derive(Debug, thiserror::Error)]
pub enum SmpError {
    #[error("Pixel run out of bounds in row {row}: column {col} + {count} exceeds width {width}")]
    PixelOutOfBounds {
        row: u32,
        col: u32,
        count: u32,
        width: u32,
    },
    #[error(
        "Player color run out of bounds in row {row}: column {col} + {count} exceeds width {width}"
    )]
    OverlayOutOfBounds {
        row: u32,
        col: u32,
        count: u32,
        width: u32,
    },
    #[error("Frame of {width}x{height} pixels is too large")]
    FrameTooLarge { width: u32, height: u32 },
    #[error("Edge table offset {offset} overlaps the frame header")]
    InvalidTableOffset { offset: u32 },
    #[error("Invalid command {command:#04x} in row {row}")]
    InvalidCommand { row: u32, command: u8 },
    #[error("Error reading frame: {source}")]
    Serial {
        #[from]
        source: SerialError,
    },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
