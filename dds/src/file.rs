use std::{
    ffi::OsStr,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use serial::{read_entity, write_entity, ByteReader, ByteWriter};

use crate::{
    error::DdsError,
    format::{CompType, ResourceFormat, ResourceFormatType},
    header::*,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DdsFile {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub mips: u32,
    /// Array layers, times 6 for cubemaps.
    pub slices: u32,
    pub cubemap: bool,
    pub format: ResourceFormat,
    /// `slices * mips` images, all mips of a slice before the next slice.
    pub subdata: Vec<Vec<u8>>,
}

pub fn is_dds(bytes: &[u8]) -> bool {
    bytes.starts_with(DDS_MAGIC)
}

fn mip_dimension(dimension: u32, mip: u32) -> u32 {
    dimension.checked_shr(mip).unwrap_or(0).max(1)
}

/// Levels until the largest dimension reaches 1.
fn max_mips(width: u32, height: u32, depth: u32) -> u32 {
    32 - width.max(height).max(depth).max(1).leading_zeros()
}

/// Formats described by a legacy pixel format block.
fn legacy_format(pixel_format: &DdsPixelFormat) -> Result<ResourceFormat, DdsError> {
    use ResourceFormatType as T;

    let flags = pixel_format.flags;

    if flags.contains(DdsPixelFormatFlags::FOURCC) {
        let format = match &pixel_format.four_cc {
            b"DXT1" => ResourceFormat::new(T::BC1, CompType::UNorm, 4, 1),
            b"DXT2" | b"DXT3" => ResourceFormat::new(T::BC2, CompType::UNorm, 4, 1),
            b"DXT4" | b"DXT5" => ResourceFormat::new(T::BC3, CompType::UNorm, 4, 1),
            b"ATI1" | b"BC4U" => ResourceFormat::new(T::BC4, CompType::UNorm, 1, 1),
            b"BC4S" => ResourceFormat::new(T::BC4, CompType::SNorm, 1, 1),
            b"ATI2" | b"BC5U" => ResourceFormat::new(T::BC5, CompType::UNorm, 2, 1),
            b"BC5S" => ResourceFormat::new(T::BC5, CompType::SNorm, 2, 1),
            // D3DFMT values stored in place of a fourcc
            [36, 0, 0, 0] => ResourceFormat::regular(CompType::UNorm, 4, 2),
            [111, 0, 0, 0] => ResourceFormat::regular(CompType::Float, 1, 2),
            [113, 0, 0, 0] => ResourceFormat::regular(CompType::Float, 4, 2),
            [114, 0, 0, 0] => ResourceFormat::regular(CompType::Float, 1, 4),
            [116, 0, 0, 0] => ResourceFormat::regular(CompType::Float, 4, 4),
            four_cc => {
                return Err(DdsError::UnsupportedFormat {
                    description: format!("fourcc {:?}", String::from_utf8_lossy(four_cc)),
                })
            }
        };

        return Ok(format);
    }

    let masks = (
        pixel_format.r_mask,
        pixel_format.g_mask,
        pixel_format.b_mask,
        pixel_format.a_mask,
    );

    let format = match (pixel_format.rgb_bit_count, masks) {
        (32, (0xff, 0xff00, 0xff0000, _)) if flags.contains(DdsPixelFormatFlags::RGB) => {
            ResourceFormat::regular(CompType::UNorm, 4, 1)
        }
        (32, (0xff0000, 0xff00, 0xff, _)) if flags.contains(DdsPixelFormatFlags::RGB) => {
            ResourceFormat::regular(CompType::UNorm, 4, 1).bgra()
        }
        (16, (0xf800, 0x07e0, 0x001f, 0)) if flags.contains(DdsPixelFormatFlags::RGB) => {
            ResourceFormat::new(T::R5G6B5, CompType::UNorm, 3, 1).bgra()
        }
        (8, _) if flags.contains(DdsPixelFormatFlags::LUMINANCE) => {
            ResourceFormat::regular(CompType::UNorm, 1, 1)
        }
        (8, _) if flags.contains(DdsPixelFormatFlags::ALPHA) => {
            ResourceFormat::new(T::A8, CompType::UNorm, 1, 1)
        }
        (bit_count, (r, g, b, a)) => {
            return Err(DdsError::UnsupportedFormat {
                description: format!(
                    "{bit_count} bit pixel format with masks {r:#x} {g:#x} {b:#x} {a:#x}"
                ),
            })
        }
    };

    Ok(format)
}

impl DdsFile {
    pub fn open_from_bytes(bytes: &[u8]) -> Result<Self, DdsError> {
        if !is_dds(bytes) {
            return Err(DdsError::NotDds);
        }

        let mut reader = ByteReader::new(bytes);
        reader.seek(DDS_MAGIC.len());

        let mut header = DdsHeader::default();
        read_entity(&mut header, &mut reader)?;

        if header.size != DDS_HEADER_SIZE {
            return Err(DdsError::InvalidHeader { size: header.size });
        }

        let volume = header.caps2.contains(DdsCaps2::VOLUME);
        let depth = if volume { header.depth.max(1) } else { 1 };
        let mips = header.mip_map_count.max(1);
        let max = max_mips(header.width, header.height, depth);

        if mips > max {
            return Err(DdsError::InvalidMipCount { mips, max });
        }

        let (format, cubemap, slices) = if header.pixel_format.has_four_cc(&DX10_FOURCC) {
            let mut dx10 = Dx10Header::default();
            read_entity(&mut dx10, &mut reader)?;

            let format = ResourceFormat::from_dxgi(dx10.dxgi_format).ok_or_else(|| {
                DdsError::UnsupportedFormat {
                    description: format!("DXGI format {}", dx10.dxgi_format),
                }
            })?;

            let cubemap = dx10.misc_flag & DX10_MISC_TEXTURE_CUBE != 0;
            let faces = if cubemap { 6 } else { 1 };

            let slices = dx10.array_size.max(1).checked_mul(faces).ok_or(
                DdsError::InvalidArraySize {
                    array_size: dx10.array_size,
                },
            )?;

            (format, cubemap, slices)
        } else {
            let cubemap = header.caps2.contains(DdsCaps2::CUBEMAP);
            let faces = if cubemap {
                // partial cubemaps only store the faces they have
                (header.caps2.bits() & DdsCaps2::CUBEMAP_ALL_FACES.bits()).count_ones()
            } else {
                1
            };

            (legacy_format(&header.pixel_format)?, cubemap, faces.max(1))
        };

        log::debug!(
            "DDS {}x{}x{depth}, {mips} mips, {slices} slices, {format:?}",
            header.width,
            header.height
        );

        // grows as data is actually read, the counts come from the file
        let mut subdata = Vec::new();

        for _ in 0..slices {
            for mip in 0..mips {
                let size = format.image_size(
                    mip_dimension(header.width, mip),
                    mip_dimension(header.height, mip),
                    mip_dimension(depth, mip),
                );

                subdata.push(reader.read_bytes(size)?.to_vec());
            }
        }

        if reader.remaining() > 0 {
            log::warn!("{} trailing bytes after DDS image data", reader.remaining());
        }

        Ok(Self {
            width: header.width,
            height: header.height,
            depth,
            mips,
            slices,
            cubemap,
            format,
            subdata,
        })
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Self, DdsError> {
        let bytes = std::fs::read(path)?;

        Self::open_from_bytes(&bytes)
    }

    pub fn subresource_size(&self, mip: u32) -> usize {
        self.format.image_size(
            mip_dimension(self.width, mip),
            mip_dimension(self.height, mip),
            mip_dimension(self.depth, mip),
        )
    }

    pub fn subresource(&self, slice: u32, mip: u32) -> Option<&[u8]> {
        if mip >= self.mips {
            return None;
        }

        self.subdata
            .get(slice as usize * self.mips as usize + mip as usize)
            .map(|data| data.as_slice())
    }

    /// Always writes a DX10 header.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>, DdsError> {
        let dxgi_format = self
            .format
            .to_dxgi()
            .ok_or_else(|| DdsError::UnsupportedFormat {
                description: format!("{:?} has no DXGI format", self.format),
            })?;

        let expect = self.slices as usize * self.mips as usize;

        if self.subdata.len() != expect {
            return Err(DdsError::MismatchedSubresourceCount {
                expect,
                have: self.subdata.len(),
            });
        }

        for (index, data) in self.subdata.iter().enumerate() {
            let expect = self.subresource_size((index % self.mips as usize) as u32);

            if data.len() != expect {
                return Err(DdsError::MismatchedSubresourceSize {
                    index,
                    expect,
                    have: data.len(),
                });
            }
        }

        let volume = self.depth > 1;
        let faces = if self.cubemap { 6 } else { 1 };

        let mut header = DdsHeader {
            height: self.height,
            width: self.width,
            pitch_or_linear_size: self.subresource_size(0) as u32,
            depth: if volume { self.depth } else { 0 },
            mip_map_count: self.mips,
            ..Default::default()
        };

        header.flags |= DdsFlags::MIPMAP_COUNT | DdsFlags::LINEAR_SIZE;
        header.pixel_format.flags = DdsPixelFormatFlags::FOURCC;
        header.pixel_format.four_cc = DX10_FOURCC;

        if self.mips > 1 {
            header.caps |= DdsCaps::MIPMAP | DdsCaps::COMPLEX;
        }

        if self.cubemap {
            header.caps |= DdsCaps::COMPLEX;
            header.caps2 |= DdsCaps2::CUBEMAP | DdsCaps2::CUBEMAP_ALL_FACES;
        }

        if volume {
            header.flags |= DdsFlags::DEPTH;
            header.caps |= DdsCaps::COMPLEX;
            header.caps2 |= DdsCaps2::VOLUME;
        }

        let mut dx10 = Dx10Header {
            dxgi_format,
            resource_dimension: if volume {
                DX10_DIMENSION_TEXTURE3D
            } else {
                DX10_DIMENSION_TEXTURE2D
            },
            misc_flag: if self.cubemap {
                DX10_MISC_TEXTURE_CUBE
            } else {
                0
            },
            array_size: self.slices / faces,
            misc_flags2: 0,
        };

        let mut writer = ByteWriter::new();

        writer.append_u8_slice(DDS_MAGIC);
        write_entity(&mut header, &mut writer)?;
        write_entity(&mut dx10, &mut writer)?;

        for data in &self.subdata {
            writer.append_u8_slice(data);
        }

        Ok(writer.into_bytes())
    }

    pub fn write_to_file(&self, path: impl AsRef<Path> + Into<PathBuf>) -> Result<(), DdsError> {
        let bytes = self.write_to_bytes()?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        file.write_all(&bytes)?;
        file.flush()?;

        Ok(())
    }
}
