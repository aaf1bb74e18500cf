use bitflags::{bitflags, Flags};
use serial::{SerialError, Serializer, Versioned};

pub const DDS_MAGIC: &[u8; 4] = b"DDS ";
pub const DDS_HEADER_SIZE: u32 = 124;
pub const DDS_PIXEL_FORMAT_SIZE: u32 = 32;
pub const DX10_FOURCC: [u8; 4] = *b"DX10";

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXEL_FORMAT = 0x1000;
        const MIPMAP_COUNT = 0x20000;
        const LINEAR_SIZE = 0x80000;
        const DEPTH = 0x800000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsPixelFormatFlags: u32 {
        const ALPHA_PIXELS = 0x1;
        const ALPHA = 0x2;
        const FOURCC = 0x4;
        const RGB = 0x40;
        const LUMINANCE = 0x20000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsCaps: u32 {
        const COMPLEX = 0x8;
        const TEXTURE = 0x1000;
        const MIPMAP = 0x400000;
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsCaps2: u32 {
        const CUBEMAP = 0x200;
        const CUBEMAP_ALL_FACES = 0xFC00;
        const VOLUME = 0x200000;
    }
}

pub const DX10_MISC_TEXTURE_CUBE: u32 = 0x4;
pub const DX10_DIMENSION_TEXTURE2D: u32 = 3;
pub const DX10_DIMENSION_TEXTURE3D: u32 = 4;

fn flags<F: Flags<Bits = u32>>(s: &mut Serializer<'_, '_>, value: &mut F) -> Result<(), SerialError> {
    let mut bits = value.bits();

    s.field(&mut bits)?;
    *value = F::from_bits_retain(bits);

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsPixelFormat {
    pub size: u32,
    pub flags: DdsPixelFormatFlags,
    pub four_cc: [u8; 4],
    pub rgb_bit_count: u32,
    pub r_mask: u32,
    pub g_mask: u32,
    pub b_mask: u32,
    pub a_mask: u32,
}

impl Default for DdsPixelFormat {
    fn default() -> Self {
        Self {
            size: DDS_PIXEL_FORMAT_SIZE,
            flags: DdsPixelFormatFlags::empty(),
            four_cc: [0; 4],
            rgb_bit_count: 0,
            r_mask: 0,
            g_mask: 0,
            b_mask: 0,
            a_mask: 0,
        }
    }
}

impl DdsPixelFormat {
    pub fn layout(&mut self, s: &mut Serializer<'_, '_>) -> Result<(), SerialError> {
        s.field(&mut self.size)?;
        flags(s, &mut self.flags)?;
        s.field(&mut self.four_cc)?;
        s.field(&mut self.rgb_bit_count)?;
        s.field(&mut self.r_mask)?;
        s.field(&mut self.g_mask)?;
        s.field(&mut self.b_mask)?;
        s.field(&mut self.a_mask)?;

        Ok(())
    }

    pub fn has_four_cc(&self, four_cc: &[u8; 4]) -> bool {
        self.flags.contains(DdsPixelFormatFlags::FOURCC) && &self.four_cc == four_cc
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsHeader {
    pub size: u32,
    pub flags: DdsFlags,
    pub height: u32,
    pub width: u32,
    pub pitch_or_linear_size: u32,
    pub depth: u32,
    pub mip_map_count: u32,
    // [u32; 11]
    pub reserved1: Vec<u32>,
    pub pixel_format: DdsPixelFormat,
    pub caps: DdsCaps,
    pub caps2: DdsCaps2,
    pub caps3: u32,
    pub caps4: u32,
    pub reserved2: u32,
}

impl Default for DdsHeader {
    fn default() -> Self {
        Self {
            size: DDS_HEADER_SIZE,
            flags: DdsFlags::CAPS | DdsFlags::HEIGHT | DdsFlags::WIDTH | DdsFlags::PIXEL_FORMAT,
            height: 0,
            width: 0,
            pitch_or_linear_size: 0,
            depth: 0,
            mip_map_count: 0,
            reserved1: vec![0; 11],
            pixel_format: DdsPixelFormat::default(),
            caps: DdsCaps::TEXTURE,
            caps2: DdsCaps2::empty(),
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }
}

impl Versioned for DdsHeader {
    type Error = SerialError;
    const NAME: &'static str = "DdsHeader";

    fn layout(&mut self, s: &mut Serializer<'_, '_>) -> Result<(), SerialError> {
        s.field(&mut self.size)?;
        flags(s, &mut self.flags)?;
        s.field(&mut self.height)?;
        s.field(&mut self.width)?;
        s.field(&mut self.pitch_or_linear_size)?;
        s.field(&mut self.depth)?;
        s.field(&mut self.mip_map_count)?;
        s.array(&mut self.reserved1, 11)?;
        self.pixel_format.layout(s)?;
        flags(s, &mut self.caps)?;
        flags(s, &mut self.caps2)?;
        s.field(&mut self.caps3)?;
        s.field(&mut self.caps4)?;
        s.field(&mut self.reserved2)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dx10Header {
    pub dxgi_format: u32,
    pub resource_dimension: u32,
    pub misc_flag: u32,
    pub array_size: u32,
    pub misc_flags2: u32,
}

impl Versioned for Dx10Header {
    type Error = SerialError;
    const NAME: &'static str = "Dx10Header";

    fn layout(&mut self, s: &mut Serializer<'_, '_>) -> Result<(), SerialError> {
        s.field(&mut self.dxgi_format)?;
        s.field(&mut self.resource_dimension)?;
        s.field(&mut self.misc_flag)?;
        s.field(&mut self.array_size)?;
        s.field(&mut self.misc_flags2)?;

        Ok(())
    }
}
