use std::{ffi::OsStr, path::Path};

use serial::{read_entity, ByteReader, FormatVersion, SerialError, Serializer, Versioned};

use crate::{
    codec::{self, TRANSPARENT_ROW},
    error::SmpError,
    SmpFrame, SmpFrameHeader, SMP_FRAME_HEADER_SIZE,
};

impl Versioned for SmpFrameHeader {
    type Error = SerialError;
    const NAME: &'static str = "SmpFrameHeader";

    fn format_version(&self) -> FormatVersion {
        self.version
    }

    fn supports(version: FormatVersion) -> bool {
        version >= FormatVersion::De2
    }

    fn layout(&mut self, s: &mut Serializer<'_, '_>) -> Result<(), SerialError> {
        s.field(&mut self.width)?;
        s.field(&mut self.height)?;
        s.field(&mut self.hotspot_x)?;
        s.field(&mut self.hotspot_y)?;
        s.field(&mut self.layer_type)?;
        s.field(&mut self.outline_table_offset)?;
        s.field(&mut self.cmd_table_offset)?;
        s.field(&mut self.flags)?;

        Ok(())
    }
}

impl Versioned for SmpFrame {
    type Error = SmpError;
    const NAME: &'static str = "SmpFrame";

    fn format_version(&self) -> FormatVersion {
        self.header.version
    }

    fn supports(version: FormatVersion) -> bool {
        SmpFrameHeader::supports(version)
    }

    /// Header, then the edge table. A read pass goes on to decode the command table.
    ///
    /// Writing stops after the edge table because there is no command encoder.
    fn layout(&mut self, s: &mut Serializer<'_, '_>) -> Result<(), SmpError> {
        self.base = s.position();

        // edges written over the header would not read back
        if !s.is_read()
            && self.header.height > 0
            && self.header.outline_table_offset < SMP_FRAME_HEADER_SIZE
        {
            return Err(SmpError::InvalidTableOffset {
                offset: self.header.outline_table_offset,
            });
        }

        self.header.layout(s)?;

        s.seek(self.base + self.header.outline_table_offset as usize);

        let height = self.header.height as usize;

        if let Some(reader) = s.reader() {
            // a garbage header must not size the tables
            let needed = height.saturating_mul(4);

            if reader.remaining() < needed {
                return Err(SerialError::UnexpectedEndOfData {
                    offset: reader.get_offset(),
                    needed,
                    remaining: reader.remaining(),
                }
                .into());
            }
        }

        if s.is_read() {
            self.left_edges = vec![0; height];
            self.right_edges = vec![0; height];
        } else {
            self.left_edges.resize(height, TRANSPARENT_ROW);
            self.right_edges.resize(height, TRANSPARENT_ROW);
        }

        for (left, right) in self.left_edges.iter_mut().zip(self.right_edges.iter_mut()) {
            s.field(left)?;
            s.field(right)?;
        }

        if let Some(reader) = s.reader() {
            codec::decode(self, reader)?;
        }

        Ok(())
    }
}

impl SmpFrame {
    /// Reads and decodes the frame whose header starts at `offset`.
    pub fn open_at(bytes: &[u8], offset: usize, version: FormatVersion) -> Result<Self, SmpError> {
        let mut reader = ByteReader::new(bytes);
        reader.seek(offset);

        let mut frame = SmpFrame::new(version);
        read_entity(&mut frame, &mut reader)?;

        Ok(frame)
    }

    pub fn open_from_bytes(bytes: &[u8], version: FormatVersion) -> Result<Self, SmpError> {
        Self::open_at(bytes, 0, version)
    }

    pub fn open_from_file(
        path: impl AsRef<OsStr> + AsRef<Path>,
        offset: usize,
        version: FormatVersion,
    ) -> Result<Self, SmpError> {
        let bytes = std::fs::read(path)?;

        Self::open_at(&bytes, offset, version)
    }
}
