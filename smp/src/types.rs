use serial::{ByteWriter, Field, FormatVersion, IResult};

/// One 4 byte SMP pixel.
///
/// Byte 0 is the palette index, byte 1 selects the palette section, bytes 2 and 3 are the
/// damage modifier mask. Nothing here resolves it to a color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SmpPixel(pub [u8; 4]);

impl SmpPixel {
    pub fn index(&self) -> u8 {
        self.0[0]
    }

    pub fn palette_section(&self) -> u8 {
        self.0[1]
    }

    pub fn damage_modifier(&self) -> [u8; 2] {
        [self.0[2], self.0[3]]
    }
}

impl Field for SmpPixel {
    const SIZE: usize = 4;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        let (i, bytes) = <[u8; 4]>::parse(i)?;

        Ok((i, SmpPixel(bytes)))
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.append_u8_slice(&self.0);
    }
}

/// Pixel that gets tinted with the owning player's color at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmpPlayerColorPixel {
    pub x: u32,
    pub y: u32,
    pub pixel: SmpPixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SmpLayerType {
    Main = 0x02,
    Shadow = 0x04,
    Outline = 0x08,
}

impl TryFrom<u32> for SmpLayerType {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x02 => Ok(SmpLayerType::Main),
            0x04 => Ok(SmpLayerType::Shadow),
            0x08 => Ok(SmpLayerType::Outline),
            other => Err(other),
        }
    }
}

pub const SMP_FRAME_HEADER_SIZE: u32 = 32;

/// Fixed 32 byte frame header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmpFrameHeader {
    pub version: FormatVersion,
    pub width: u32,
    pub height: u32,
    pub hotspot_x: i32,
    pub hotspot_y: i32,
    pub layer_type: u32,
    /// Relative to the start of the frame header.
    pub outline_table_offset: u32,
    /// Relative to the start of the frame header.
    pub cmd_table_offset: u32,
    // 0x01, 0x02, 0x80 and 0xA0 are seen in the wild, meaning unknown
    pub flags: u32,
}

impl SmpFrameHeader {
    pub fn new(version: FormatVersion) -> Self {
        Self {
            version,
            width: 0,
            height: 0,
            hotspot_x: 0,
            hotspot_y: 0,
            layer_type: SmpLayerType::Main as u32,
            outline_table_offset: 0,
            cmd_table_offset: 0,
            flags: 0,
        }
    }

    pub fn layer(&self) -> Option<SmpLayerType> {
        SmpLayerType::try_from(self.layer_type).ok()
    }
}

impl Default for SmpFrameHeader {
    fn default() -> Self {
        Self::new(FormatVersion::LATEST)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmpFrame {
    pub header: SmpFrameHeader,
    /// Where the header starts in the source. Table offsets count from here.
    pub base: usize,
    /// Transparent pixels from the left of each row. `0xFFFF` marks an empty row.
    pub left_edges: Vec<u16>,
    /// Transparent pixels from the right of each row. `0xFFFF` marks an empty row.
    pub right_edges: Vec<u16>,
    /// Row major, `width * height`.
    pub pixels: Vec<SmpPixel>,
    pub player_color_overlay: Vec<SmpPlayerColorPixel>,
}

impl SmpFrame {
    pub fn new(version: FormatVersion) -> Self {
        Self {
            header: SmpFrameHeader::new(version),
            ..Default::default()
        }
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<&SmpPixel> {
        if x >= self.header.width {
            return None;
        }

        self.pixels
            .get(y as usize * self.header.width as usize + x as usize)
    }
}
