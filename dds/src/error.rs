use serial::SerialError;

#[derive(Debug, thiserror::Error)]
pub enum DdsError {
    #[error("Not a DDS file")]
    NotDds,
    #[error("Invalid DDS header size: {size}")]
    InvalidHeader { size: u32 },
    #[error("Invalid mip count {mips}, at most {max} for these dimensions")]
    InvalidMipCount { mips: u32, max: u32 },
    #[error("Invalid array size: {array_size}")]
    InvalidArraySize { array_size: u32 },
    #[error("Unsupported texture format: {description}")]
    UnsupportedFormat { description: String },
    #[error("Mismatched subresource count. Expect ({expect}). Have ({have})")]
    MismatchedSubresourceCount { expect: usize, have: usize },
    #[error("Mismatched size of subresource {index}. Expect ({expect}). Have ({have})")]
    MismatchedSubresourceSize {
        index: usize,
        expect: usize,
        have: usize,
    },
    #[error("Error reading texture: {source}")]
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
