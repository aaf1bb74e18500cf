//! JASC-PAL color palettes as shipped with the genie games.
use std::{ffi::OsStr, fmt::Write, path::Path};

pub mod error;
mod parser;

pub use error::PaletteError;
pub use parser::parse_palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorPalette {
    pub colors: Vec<Color>,
}

impl ColorPalette {
    pub fn new(colors: impl Into<Vec<Color>>) -> Self {
        Self {
            colors: colors.into(),
        }
    }

    pub fn open_from_str(s: &str) -> Result<Self, PaletteError> {
        parse_palette(s)
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Self, PaletteError> {
        let text = std::fs::read_to_string(path)?;

        Self::open_from_str(&text)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_at(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn write_to_string(&self) -> String {
        let mut res = String::new();

        // writing into a String does not fail
        let _ = write!(res, "JASC-PAL\r\n0100\r\n{}\r\n", self.colors.len());

        for color in &self.colors {
            let _ = write!(res, "{} {} {}\r\n", color.r, color.g, color.b);
        }

        res
    }
}
