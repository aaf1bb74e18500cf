//! SMP sprite frames
//!
//! A frame is a 32 byte header, an edge table with a left and right transparent run per row
//! and a command table that run length encodes the visible part of every row.
pub mod codec;
pub mod error;
mod frame;
mod types;

pub use error::SmpError;
pub use types::*;

#[cfg(test)]
mod test {
    use serial::{read_entity, write_entity, ByteReader, ByteWriter, FormatVersion, SerialError};

    use crate::{
        codec::TRANSPARENT_ROW, SmpError, SmpFrame, SmpFrameHeader, SmpLayerType, SmpPixel,
        SmpPlayerColorPixel,
    };

    fn pixel(k: u8) -> SmpPixel {
        SmpPixel([k, 1, 0, 0])
    }

    /// Header at 0, edge table right after it, command table right after that.
    fn frame_bytes(width: u32, edges: &[(u16, u16)], commands: &[u8]) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        let height = edges.len() as u32;

        for value in [width, height, 0, 0, 2, 32, 32 + 4 * height, 0] {
            writer.append_u32(value);
        }

        for (left, right) in edges {
            writer.append_u16(*left);
            writer.append_u16(*right);
        }

        writer.append_u8_slice(commands);
        writer.into_bytes()
    }

    fn commands(parts: &[&[u8]]) -> Vec<u8> {
        parts.concat()
    }

    fn decode(bytes: &[u8]) -> (Result<SmpFrame, SmpError>, usize) {
        let mut reader = ByteReader::new(bytes);
        let mut frame = SmpFrame::new(FormatVersion::De2);

        let res = read_entity(&mut frame, &mut reader).map(|_| frame);

        (res, reader.get_offset())
    }

    #[test]
    fn parse_fixture() {
        let file = include_bytes!("../test/frame_6x4.bin");
        let frame = SmpFrame::open_at(file, 16, FormatVersion::De2).unwrap();

        assert_eq!((frame.width(), frame.height()), (6, 4));
        assert_eq!((frame.header.hotspot_x, frame.header.hotspot_y), (-3, 7));
        assert_eq!(frame.header.layer(), Some(SmpLayerType::Main));
        assert_eq!(frame.header.flags, 0x80);
        assert_eq!(frame.base, 16);

        assert_eq!(frame.left_edges, [1, TRANSPARENT_ROW, 0, 2]);
        assert_eq!(frame.right_edges, [1, TRANSPARENT_ROW, 2, 0]);
        assert_eq!(frame.pixels.len(), 24);

        let empty = SmpPixel::default();

        assert_eq!(
            &frame.pixels[0..6],
            [empty, pixel(1), pixel(2), pixel(3), pixel(4), empty]
        );
        assert_eq!(&frame.pixels[6..12], [empty; 6]);

        let p = frame.pixel(4, 0).unwrap();
        assert_eq!(p.index(), 4);
        assert_eq!(p.palette_section(), 1);
        assert_eq!(p.damage_modifier(), [0, 0]);
        assert_eq!(frame.pixel(6, 0), None);
        assert_eq!(
            &frame.pixels[12..18],
            [empty, empty, empty, pixel(7), empty, empty]
        );
        assert_eq!(
            &frame.pixels[18..24],
            [empty, empty, pixel(8), pixel(9), pixel(10), pixel(11)]
        );

        assert_eq!(
            frame.player_color_overlay,
            [
                SmpPlayerColorPixel {
                    x: 1,
                    y: 2,
                    pixel: pixel(5)
                },
                SmpPlayerColorPixel {
                    x: 2,
                    y: 2,
                    pixel: pixel(6)
                },
            ]
        );

        assert_eq!(frame.pixel(3, 2), Some(&pixel(7)));
        assert_eq!(frame.pixel(6, 0), None);
    }

    #[test]
    fn fixture_stops_after_last_terminator() {
        let file = include_bytes!("../test/frame_6x4.bin");
        let mut reader = ByteReader::new(file);
        reader.seek(16);

        let mut frame = SmpFrame::new(FormatVersion::De2);
        read_entity(&mut frame, &mut reader).unwrap();

        // two trailing bytes are left alone
        assert_eq!(reader.get_offset(), file.len() - 2);
    }

    #[test]
    fn terminator() {
        let bytes = frame_bytes(
            4,
            &[(0, 2)],
            &commands(&[&[0b0000_0101], &pixel(1).0, &pixel(2).0, &[3, 0xAB]]),
        );

        let (frame, offset) = decode(&bytes);
        let frame = frame.unwrap();

        assert_eq!(offset, bytes.len() - 1);
        assert_eq!(
            frame.pixels,
            [pixel(1), pixel(2), SmpPixel::default(), SmpPixel::default()]
        );
        assert!(frame.player_color_overlay.is_empty());
    }

    #[test]
    fn sentinel_row_reads_nothing() {
        // rows 0 and 1 each have one sentinel set, row 2 commands start the table
        let bytes = frame_bytes(
            2,
            &[(TRANSPARENT_ROW, 0), (0, TRANSPARENT_ROW), (0, 0)],
            &commands(&[&[0b0000_0101], &pixel(1).0, &pixel(2).0, &[3]]),
        );

        let (frame, offset) = decode(&bytes);
        let frame = frame.unwrap();

        assert_eq!(offset, bytes.len());
        assert_eq!(&frame.pixels[..4], [SmpPixel::default(); 4]);
        assert_eq!(&frame.pixels[4..], [pixel(1), pixel(2)]);
        assert!(frame.player_color_overlay.is_empty());
    }

    #[test]
    fn player_color_interleave() {
        let bytes = frame_bytes(
            1,
            &[(0, 0)],
            &commands(&[&[0b0000_0010, 0x7F], &pixel(9).0, &[3]]),
        );

        let (frame, offset) = decode(&bytes);
        let frame = frame.unwrap();

        assert_eq!(offset, bytes.len());
        assert_eq!(frame.pixels, [SmpPixel::default()]);
        assert_eq!(
            frame.player_color_overlay,
            [SmpPlayerColorPixel {
                x: 0,
                y: 0,
                pixel: pixel(9)
            }]
        );
    }

    #[test]
    fn skip_moves_column() {
        // skip 2, then one color
        let bytes = frame_bytes(
            3,
            &[(0, 0)],
            &commands(&[&[0b0000_0100, 0b0000_0001], &pixel(4).0, &[3]]),
        );

        let frame = decode(&bytes).0.unwrap();

        assert_eq!(
            frame.pixels,
            [SmpPixel::default(), SmpPixel::default(), pixel(4)]
        );
    }

    #[test]
    fn all_transparent_frame_is_empty() {
        let bytes = frame_bytes(5, &[(TRANSPARENT_ROW, TRANSPARENT_ROW); 3], &[]);

        let frame = decode(&bytes).0.unwrap();

        assert_eq!((frame.width(), frame.height()), (0, 0));
        assert!(frame.pixels.is_empty());
        assert_eq!(frame.left_edges.len(), 0);
        assert_eq!(frame.right_edges.len(), 0);
    }

    #[test]
    fn only_terminators_is_empty() {
        let bytes = frame_bytes(5, &[(0, 0), (1, 1)], &[3, 3]);

        let frame = decode(&bytes).0.unwrap();

        assert_eq!((frame.width(), frame.height()), (0, 0));
    }

    #[test]
    fn color_run_out_of_bounds() {
        let bytes = frame_bytes(
            2,
            &[(1, 0)],
            &commands(&[&[0b0000_0101], &pixel(1).0, &pixel(2).0, &[3]]),
        );

        let res = decode(&bytes).0;

        assert!(matches!(
            res,
            Err(SmpError::PixelOutOfBounds {
                row: 0,
                col: 1,
                count: 2,
                width: 2
            })
        ));
    }

    #[test]
    fn skip_out_of_bounds() {
        let bytes = frame_bytes(2, &[(0, 0)], &[0b0000_1000, 3]);

        assert!(matches!(
            decode(&bytes).0,
            Err(SmpError::PixelOutOfBounds { count: 3, .. })
        ));
    }

    #[test]
    fn player_color_out_of_bounds() {
        let bytes = frame_bytes(
            1,
            &[(0, 0), (0, 0)],
            &commands(&[&[3, 0b0000_0110, 0, 0], &pixel(1).0, &pixel(2).0, &[3]]),
        );

        assert!(matches!(
            decode(&bytes).0,
            Err(SmpError::OverlayOutOfBounds {
                row: 1,
                col: 0,
                count: 2,
                width: 1
            })
        ));
    }

    #[test]
    fn truncated_command_table() {
        let bytes = frame_bytes(4, &[(0, 0)], &[0b0000_0101, 1, 1, 0]);

        assert!(matches!(
            decode(&bytes).0,
            Err(SmpError::Serial {
                source: SerialError::UnexpectedEndOfData { needed: 4, .. }
            })
        ));
    }

    #[test]
    fn edge_table_past_end() {
        let mut bytes = frame_bytes(4, &[(0, 0)], &[0b0000_0001, 1, 1, 0, 0, 3]);
        // claim a million rows
        bytes[4..8].copy_from_slice(&1_000_000u32.to_le_bytes());

        assert!(matches!(
            decode(&bytes).0,
            Err(SmpError::Serial {
                source: SerialError::UnexpectedEndOfData {
                    offset: 32,
                    needed: 4_000_000,
                    ..
                }
            })
        ));
    }

    #[test]
    fn width_too_large() {
        for width in [0x4000_0000, u32::MAX, 0x1_0000] {
            let bytes = frame_bytes(width, &[(0, 0)], &[3]);

            assert!(matches!(
                decode(&bytes).0,
                Err(SmpError::FrameTooLarge { width: w, height: 1 }) if w == width
            ));
        }
    }

    #[test]
    fn widest_row() {
        let bytes = frame_bytes(0xFFFF, &[(0xFFFE, 0)], &[0b0000_0001, 7, 1, 0, 0, 3]);
        let frame = decode(&bytes).0.unwrap();

        assert_eq!(frame.pixels.len(), 0xFFFF);
        assert_eq!(frame.pixel(0xFFFE, 0), Some(&pixel(7)));
    }

    #[test]
    fn invalid_command() {
        let bytes = frame_bytes(4, &[(0, 0)], &[0b0000_0111, 3]);

        assert!(matches!(
            decode(&bytes).0,
            Err(SmpError::InvalidCommand {
                row: 0,
                command: 0x07
            })
        ));
    }

    #[test]
    fn deterministic() {
        let file = include_bytes!("../test/frame_6x4.bin");

        let a = SmpFrame::open_at(file, 16, FormatVersion::De2).unwrap();
        let b = SmpFrame::open_at(file, 16, FormatVersion::De2).unwrap();

        assert_eq!(a.pixels, b.pixels);
        assert_eq!(a.player_color_overlay, b.player_color_overlay);
    }

    #[test]
    fn unsupported_version() {
        let file = include_bytes!("../test/frame_6x4.bin");

        let res = SmpFrame::open_at(file, 16, FormatVersion::AoK);

        assert!(matches!(
            res,
            Err(SmpError::Serial {
                source: SerialError::UnsupportedVersion {
                    entity: "SmpFrame",
                    ..
                }
            })
        ));
    }

    #[test]
    fn header_round_trip() {
        let mut header = SmpFrameHeader {
            width: 120,
            height: 96,
            hotspot_x: -60,
            hotspot_y: -80,
            layer_type: SmpLayerType::Shadow as u32,
            outline_table_offset: 32,
            cmd_table_offset: 416,
            flags: 0xA0,
            ..Default::default()
        };
        let mut writer = ByteWriter::new();

        write_entity(&mut header, &mut writer).unwrap();

        assert_eq!(writer.data.len(), 32);

        let mut read = SmpFrameHeader::default();
        read_entity(&mut read, &mut ByteReader::new(&writer.data)).unwrap();

        assert_eq!(read, header);
        assert_eq!(read.layer(), Some(SmpLayerType::Shadow));
    }

    #[test]
    fn write_header_and_edges() {
        let mut frame = SmpFrame::new(FormatVersion::De2);
        frame.header.width = 4;
        frame.header.height = 2;
        frame.header.outline_table_offset = 40;
        frame.header.cmd_table_offset = 48;
        frame.left_edges = vec![1, TRANSPARENT_ROW];
        frame.right_edges = vec![0, TRANSPARENT_ROW];

        let mut writer = ByteWriter::new();
        writer.append_u32(0xDEAD_BEEF);

        write_entity(&mut frame, &mut writer).unwrap();

        assert_eq!(frame.base, 4);
        // gap between header and edge table is zero filled
        assert_eq!(&writer.data[36..44], [0; 8]);
        assert_eq!(
            &writer.data[44..52],
            [1, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]
        );

        let mut header = SmpFrameHeader::default();
        let mut reader = ByteReader::new(&writer.data);
        reader.seek(4);
        read_entity(&mut header, &mut reader).unwrap();

        assert_eq!(header, frame.header);
    }

    #[test]
    fn write_edges_over_header() {
        let mut frame = SmpFrame::new(FormatVersion::De2);
        frame.header.width = 2;
        frame.header.height = 1;
        frame.left_edges = vec![0];
        frame.right_edges = vec![0];

        let mut writer = ByteWriter::new();

        assert!(matches!(
            write_entity(&mut frame, &mut writer),
            Err(SmpError::InvalidTableOffset { offset: 0 })
        ));
        assert!(writer.data.is_empty());

        // no rows, nothing to overlap
        frame.header.height = 0;

        write_entity(&mut frame, &mut writer).unwrap();
        assert_eq!(writer.data.len(), 32);
    }
}
