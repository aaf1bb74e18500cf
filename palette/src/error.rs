#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Failed to parse JASC-PAL header")]
    ParseHeader,
    #[error("Failed to parse color on line {line}")]
    ParseColor { line: usize },
    #[error("Mismatched color count. Expect ({expect}). Have ({have})")]
    MismatchedColorCount { expect: usize, have: usize },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
