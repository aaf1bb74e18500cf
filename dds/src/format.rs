use bitflags::bitflags;

use CompType::{Float, SNorm, UNorm, UNormSRGB};
use ResourceFormatType as T;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CompType {
    Typeless = 0,
    Float,
    UNorm,
    SNorm,
    UInt,
    SInt,
    UScaled,
    SScaled,
    Depth,
    Double,
    UNormSRGB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ResourceFormatType {
    Regular = 0,
    Undefined,
    BC1,
    BC2,
    BC3,
    BC4,
    BC5,
    BC6,
    BC7,
    ETC2,
    EAC,
    ASTC,
    R10G10B10A2,
    R11G11B10,
    R5G6B5,
    R5G5B5A1,
    R9G9B9E5,
    R4G4B4A4,
    R4G4,
    D16S8,
    D24S8,
    D32S8,
    S8,
    YUV8,
    YUV10,
    YUV12,
    YUV16,
    PVRTC,
    A8,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ResourceFormatFlags: u16 {
        const BGRA = 0x001;

        const YUV_444 = 0x004;
        const YUV_422 = 0x008;
        const YUV_420 = 0x010;
        const SUBSAMPLE_MASK = 0x01C;

        const PLANES_2 = 0x020;
        const PLANES_3 = 0x040;
        const PLANES_MASK = 0x060;
    }
}

/// Physical layout of a texture's texels.
///
/// Ordering goes type, component count, component width, component type, flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceFormat {
    pub format_type: ResourceFormatType,
    pub comp_count: u8,
    pub comp_byte_width: u8,
    pub comp_type: CompType,
    flags: ResourceFormatFlags,
}

impl Default for ResourceFormat {
    fn default() -> Self {
        Self::new(ResourceFormatType::Undefined, CompType::Typeless, 0, 0)
    }
}

impl ResourceFormat {
    pub const fn new(
        format_type: ResourceFormatType,
        comp_type: CompType,
        comp_count: u8,
        comp_byte_width: u8,
    ) -> Self {
        Self {
            format_type,
            comp_count,
            comp_byte_width,
            comp_type,
            flags: ResourceFormatFlags::empty(),
        }
    }

    pub const fn regular(comp_type: CompType, comp_count: u8, comp_byte_width: u8) -> Self {
        Self::new(
            ResourceFormatType::Regular,
            comp_type,
            comp_count,
            comp_byte_width,
        )
    }

    pub const fn bgra(mut self) -> Self {
        self.flags = ResourceFormatFlags::BGRA;
        self
    }

    pub fn flags(&self) -> ResourceFormatFlags {
        self.flags
    }

    pub fn special(&self) -> bool {
        self.format_type != ResourceFormatType::Regular
    }

    pub fn bgra_order(&self) -> bool {
        self.flags.contains(ResourceFormatFlags::BGRA)
    }

    pub fn srgb_corrected(&self) -> bool {
        self.comp_type == CompType::UNormSRGB
    }

    pub fn yuv_subsampling(&self) -> u32 {
        if self.flags.contains(ResourceFormatFlags::YUV_444) {
            444
        } else if self.flags.contains(ResourceFormatFlags::YUV_422) {
            422
        } else if self.flags.contains(ResourceFormatFlags::YUV_420) {
            420
        } else {
            0
        }
    }

    pub fn yuv_plane_count(&self) -> u32 {
        if self.flags.contains(ResourceFormatFlags::PLANES_3) {
            3
        } else if self.flags.contains(ResourceFormatFlags::PLANES_2) {
            2
        } else {
            1
        }
    }

    pub fn set_bgra_order(&mut self, flag: bool) {
        self.flags.set(ResourceFormatFlags::BGRA, flag);
    }

    /// Anything but 444, 422 or 420 clears the subsampling bits.
    pub fn set_yuv_subsampling(&mut self, subsampling: u32) {
        self.flags.remove(ResourceFormatFlags::SUBSAMPLE_MASK);

        match subsampling {
            444 => self.flags.insert(ResourceFormatFlags::YUV_444),
            422 => self.flags.insert(ResourceFormatFlags::YUV_422),
            420 => self.flags.insert(ResourceFormatFlags::YUV_420),
            _ => (),
        }
    }

    pub fn set_yuv_plane_count(&mut self, planes: u32) {
        self.flags.remove(ResourceFormatFlags::PLANES_MASK);

        match planes {
            2 => self.flags.insert(ResourceFormatFlags::PLANES_2),
            3 => self.flags.insert(ResourceFormatFlags::PLANES_3),
            _ => (),
        }
    }

    /// Stored as 4x4 texel blocks.
    pub fn is_block_compressed(&self) -> bool {
        matches!(
            self.format_type,
            ResourceFormatType::BC1
                | ResourceFormatType::BC2
                | ResourceFormatType::BC3
                | ResourceFormatType::BC4
                | ResourceFormatType::BC5
                | ResourceFormatType::BC6
                | ResourceFormatType::BC7
                | ResourceFormatType::ETC2
                | ResourceFormatType::EAC
                | ResourceFormatType::ASTC
                | ResourceFormatType::PVRTC
        )
    }

    /// Bytes per 4x4 block for block compressed formats, bytes per texel otherwise.
    ///
    /// 0 when the format has no sensible answer.
    pub fn element_size(&self) -> u32 {
        use ResourceFormatType::*;

        match self.format_type {
            Undefined => 0,
            Regular => self.comp_byte_width as u32 * self.comp_count as u32,
            BC1 | BC4 => 8,
            BC2 | BC3 | BC5 | BC6 | BC7 => 16,
            ETC2 => 8,
            // R11 is 8, RG11 and RGBA8 are 16
            EAC => {
                if self.comp_count == 1 {
                    8
                } else {
                    16
                }
            }
            // always 128 bits per block
            ASTC => 16,
            R10G10B10A2 | R11G11B10 | R9G9B9E5 => 4,
            R5G6B5 | R5G5B5A1 | R4G4B4A4 => 2,
            R4G4 => 1,
            // tightly packed
            D16S8 => 3,
            D24S8 => 4,
            // tightly packed
            D32S8 => 5,
            S8 | A8 => 1,
            YUV8 => self.comp_count as u32,
            YUV10 | YUV12 | YUV16 => self.comp_count as u32 * 2,
            // 2bpp and 4bpp look the same from here
            PVRTC => 8,
        }
    }

    /// Byte size of one mip level of one slice.
    pub fn image_size(&self, width: u32, height: u32, depth: u32) -> usize {
        let depth = depth.max(1) as usize;
        let element_size = self.element_size() as usize;

        let (wide, high) = if self.is_block_compressed() {
            (width.div_ceil(4), height.div_ceil(4))
        } else {
            (width, height)
        };

        // saturates so a bogus header fails on the read instead
        (wide.max(1) as usize)
            .saturating_mul(high.max(1) as usize)
            .saturating_mul(element_size)
            .saturating_mul(depth)
    }

    pub fn from_dxgi(dxgi_format: u32) -> Option<ResourceFormat> {
        DXGI_FORMATS
            .iter()
            .find(|(dxgi, _)| *dxgi == dxgi_format)
            .map(|(_, format)| *format)
    }

    pub fn to_dxgi(&self) -> Option<u32> {
        DXGI_FORMATS
            .iter()
            .find(|(_, format)| format == self)
            .map(|(dxgi, _)| *dxgi)
    }
}

static DXGI_FORMATS: &[(u32, ResourceFormat)] = &[
    (2, ResourceFormat::regular(Float, 4, 4)),
    (10, ResourceFormat::regular(Float, 4, 2)),
    (11, ResourceFormat::regular(UNorm, 4, 2)),
    (24, ResourceFormat::new(T::R10G10B10A2, UNorm, 4, 1)),
    (26, ResourceFormat::new(T::R11G11B10, Float, 3, 1)),
    (28, ResourceFormat::regular(UNorm, 4, 1)),
    (29, ResourceFormat::regular(UNormSRGB, 4, 1)),
    (41, ResourceFormat::regular(Float, 1, 4)),
    (49, ResourceFormat::regular(UNorm, 2, 1)),
    (56, ResourceFormat::regular(UNorm, 1, 2)),
    (61, ResourceFormat::regular(UNorm, 1, 1)),
    (65, ResourceFormat::new(T::A8, UNorm, 1, 1)),
    (71, ResourceFormat::new(T::BC1, UNorm, 4, 1)),
    (72, ResourceFormat::new(T::BC1, UNormSRGB, 4, 1)),
    (74, ResourceFormat::new(T::BC2, UNorm, 4, 1)),
    (75, ResourceFormat::new(T::BC2, UNormSRGB, 4, 1)),
    (77, ResourceFormat::new(T::BC3, UNorm, 4, 1)),
    (78, ResourceFormat::new(T::BC3, UNormSRGB, 4, 1)),
    (80, ResourceFormat::new(T::BC4, UNorm, 1, 1)),
    (81, ResourceFormat::new(T::BC4, SNorm, 1, 1)),
    (83, ResourceFormat::new(T::BC5, UNorm, 2, 1)),
    (84, ResourceFormat::new(T::BC5, SNorm, 2, 1)),
    (85, ResourceFormat::new(T::R5G6B5, UNorm, 3, 1).bgra()),
    (86, ResourceFormat::new(T::R5G5B5A1, UNorm, 4, 1).bgra()),
    (87, ResourceFormat::regular(UNorm, 4, 1).bgra()),
    // X8 reads the same, lookups from a format land on 87 and 91
    (88, ResourceFormat::regular(UNorm, 4, 1).bgra()),
    (91, ResourceFormat::regular(UNormSRGB, 4, 1).bgra()),
    (93, ResourceFormat::regular(UNormSRGB, 4, 1).bgra()),
    (95, ResourceFormat::new(T::BC6, Float, 3, 2)),
    (98, ResourceFormat::new(T::BC7, UNorm, 4, 1)),
    (99, ResourceFormat::new(T::BC7, UNormSRGB, 4, 1)),
    (115, ResourceFormat::new(T::R4G4B4A4, UNorm, 4, 1).bgra()),
];
