//! DirectDraw Surface textures used by the definitive editions.
pub mod error;
mod file;
mod format;
mod header;

pub use error::DdsError;
pub use file::{is_dds, DdsFile};
pub use format::{CompType, ResourceFormat, ResourceFormatFlags, ResourceFormatType};
pub use header::*;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_legacy_bgra() {
        let file = include_bytes!("../test/legacy_bgra.dds");
        let dds = DdsFile::open_from_bytes(file).unwrap();

        assert_eq!(dds.width, 4);
        assert_eq!(dds.height, 4);
        assert_eq!(dds.depth, 1);
        assert_eq!(dds.mips, 3);
        assert_eq!(dds.slices, 1);
        assert!(!dds.cubemap);

        assert_eq!(dds.format, ResourceFormat::regular(CompType::UNorm, 4, 1).bgra());
        assert!(dds.format.bgra_order());

        let sizes: Vec<usize> = dds.subdata.iter().map(|data| data.len()).collect();
        assert_eq!(sizes, [64, 16, 4]);

        assert_eq!(dds.subresource(0, 0).unwrap()[63], 63);
        assert_eq!(dds.subresource(0, 1).unwrap()[0], 100);
        assert_eq!(dds.subresource(0, 2).unwrap(), [200, 201, 202, 203]);
        assert_eq!(dds.subresource(0, 3), None);
    }

    #[test]
    fn read_dxt1_cubemap() {
        let file = include_bytes!("../test/cube_dxt1.dds");
        let dds = DdsFile::open_from_bytes(file).unwrap();

        assert!(dds.cubemap);
        assert_eq!(dds.slices, 6);
        assert_eq!(dds.mips, 1);
        assert_eq!(dds.format.format_type, ResourceFormatType::BC1);
        assert!(dds.format.is_block_compressed());

        for face in 0..6 {
            let data = dds.subresource(face, 0).unwrap();

            assert_eq!(data.len(), 32);
            assert!(data.iter().all(|&byte| byte == face as u8));
        }
    }

    #[test]
    fn write_dx10_and_read_back() {
        let file = include_bytes!("../test/cube_dxt1.dds");
        let dds = DdsFile::open_from_bytes(file).unwrap();

        let bytes = dds.write_to_bytes().unwrap();

        // magic, header, dx10 header, six faces
        assert_eq!(bytes.len(), 4 + 124 + 20 + 6 * 32);
        assert_eq!(&bytes[84..88], b"DX10");
        // BC1_UNORM
        assert_eq!(&bytes[128..132], &71u32.to_le_bytes());

        let again = DdsFile::open_from_bytes(&bytes).unwrap();

        assert_eq!(again, dds);
    }

    #[test]
    fn write_rejects_wrong_subresources() {
        let file = include_bytes!("../test/legacy_bgra.dds");
        let mut dds = DdsFile::open_from_bytes(file).unwrap();

        dds.subdata[1].pop();

        assert!(matches!(
            dds.write_to_bytes(),
            Err(DdsError::MismatchedSubresourceSize {
                index: 1,
                expect: 16,
                have: 15
            })
        ));

        dds.subdata.pop();

        assert!(matches!(
            dds.write_to_bytes(),
            Err(DdsError::MismatchedSubresourceCount { expect: 3, have: 2 })
        ));
    }

    #[test]
    fn not_dds() {
        assert!(!is_dds(b"BM6\0"));
        assert!(matches!(
            DdsFile::open_from_bytes(b"BM6\0\0\0\0\0"),
            Err(DdsError::NotDds)
        ));
    }

    #[test]
    fn truncated_image_data() {
        let file = include_bytes!("../test/legacy_bgra.dds");

        assert!(matches!(
            DdsFile::open_from_bytes(&file[..200]),
            Err(DdsError::Serial { .. })
        ));
    }

    #[test]
    fn array_size_overflow() {
        let file = include_bytes!("../test/cube_dxt1.dds");
        let mut bytes = DdsFile::open_from_bytes(file)
            .unwrap()
            .write_to_bytes()
            .unwrap();

        // array size in the DX10 header, the cube flag stays set
        bytes[140..144].copy_from_slice(&0x4000_0000u32.to_le_bytes());

        assert!(matches!(
            DdsFile::open_from_bytes(&bytes),
            Err(DdsError::InvalidArraySize {
                array_size: 0x4000_0000
            })
        ));
    }

    #[test]
    fn mip_count_past_dimensions() {
        let file = include_bytes!("../test/legacy_bgra.dds");
        let mut bytes = file.to_vec();

        bytes[28..32].copy_from_slice(&40u32.to_le_bytes());
        bytes.extend_from_slice(&[0; 4096]);

        assert!(matches!(
            DdsFile::open_from_bytes(&bytes),
            Err(DdsError::InvalidMipCount { mips: 40, max: 3 })
        ));

        // one level more than 4x4 has
        bytes[28..32].copy_from_slice(&4u32.to_le_bytes());

        assert!(matches!(
            DdsFile::open_from_bytes(&bytes),
            Err(DdsError::InvalidMipCount { mips: 4, max: 3 })
        ));
    }

    #[test]
    fn huge_dimensions() {
        let file = include_bytes!("../test/legacy_bgra.dds");
        let mut bytes = file.to_vec();

        // height and width
        bytes[12..20].copy_from_slice(&[0xFF; 8]);

        assert!(matches!(
            DdsFile::open_from_bytes(&bytes),
            Err(DdsError::Serial { .. })
        ));
    }

    #[test]
    fn element_sizes() {
        assert_eq!(ResourceFormat::default().element_size(), 0);
        assert_eq!(ResourceFormat::regular(CompType::Float, 4, 4).element_size(), 16);
        assert_eq!(
            ResourceFormat::new(ResourceFormatType::BC1, CompType::UNorm, 4, 1).element_size(),
            8
        );
        assert_eq!(
            ResourceFormat::new(ResourceFormatType::BC7, CompType::UNorm, 4, 1).element_size(),
            16
        );
        assert_eq!(
            ResourceFormat::new(ResourceFormatType::EAC, CompType::UNorm, 1, 1).element_size(),
            8
        );
        assert_eq!(
            ResourceFormat::new(ResourceFormatType::EAC, CompType::UNorm, 2, 1).element_size(),
            16
        );
        assert_eq!(
            ResourceFormat::new(ResourceFormatType::D32S8, CompType::Depth, 2, 1).element_size(),
            5
        );
        assert_eq!(
            ResourceFormat::new(ResourceFormatType::YUV10, CompType::UNorm, 3, 2).element_size(),
            6
        );
    }

    #[test]
    fn block_image_size_rounds_up() {
        let bc1 = ResourceFormat::new(ResourceFormatType::BC1, CompType::UNorm, 4, 1);

        assert_eq!(bc1.image_size(1, 1, 1), 8);
        assert_eq!(bc1.image_size(5, 4, 1), 16);
        assert_eq!(
            ResourceFormat::regular(CompType::UNorm, 4, 1).image_size(3, 2, 2),
            48
        );

        let rgba32f = ResourceFormat::regular(CompType::Float, 4, 4);
        assert_eq!(rgba32f.image_size(u32::MAX, u32::MAX, u32::MAX), usize::MAX);
    }

    #[test]
    fn yuv_flags() {
        let mut format = ResourceFormat::new(ResourceFormatType::YUV8, CompType::UNorm, 3, 1);

        assert_eq!(format.yuv_subsampling(), 0);
        assert_eq!(format.yuv_plane_count(), 1);

        format.set_yuv_subsampling(420);
        format.set_yuv_plane_count(2);
        format.set_bgra_order(true);

        assert_eq!(format.yuv_subsampling(), 420);
        assert_eq!(format.yuv_plane_count(), 2);
        assert!(format.bgra_order());

        format.set_yuv_subsampling(422);
        format.set_yuv_plane_count(7);
        format.set_bgra_order(false);

        assert_eq!(format.yuv_subsampling(), 422);
        assert_eq!(format.yuv_plane_count(), 1);
        assert_eq!(format.flags(), ResourceFormatFlags::YUV_422);
    }

    #[test]
    fn format_ordering() {
        let regular = ResourceFormat::regular(CompType::UNorm, 4, 1);

        assert!(regular < ResourceFormat::new(ResourceFormatType::BC1, CompType::UNorm, 4, 1));
        assert!(regular < ResourceFormat::regular(CompType::UNorm, 4, 2));
        assert!(regular < regular.bgra());
        assert!(!regular.special());
        assert!(ResourceFormat::default().special());
    }

    #[test]
    fn dxgi_mapping() {
        let srgb = ResourceFormat::regular(CompType::UNormSRGB, 4, 1);

        assert!(srgb.srgb_corrected());
        assert_eq!(srgb.to_dxgi(), Some(29));
        assert_eq!(ResourceFormat::from_dxgi(29), Some(srgb));
        assert_eq!(
            ResourceFormat::from_dxgi(87),
            Some(ResourceFormat::regular(CompType::UNorm, 4, 1).bgra())
        );
        assert_eq!(ResourceFormat::from_dxgi(88), ResourceFormat::from_dxgi(87));
        assert_eq!(
            ResourceFormat::regular(CompType::UNorm, 4, 1).bgra().to_dxgi(),
            Some(87)
        );
        assert_eq!(ResourceFormat::from_dxgi(0), None);
        assert_eq!(ResourceFormat::default().to_dxgi(), None);
    }
}
