use byte_writer::ByteWriter;

use crate::{error::SerialError, field::Field, reader::ByteReader, FormatVersion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    Write,
}

/// The cursor a pass runs against.
pub enum Stream<'s, 'a> {
    Read(&'s mut ByteReader<'a>),
    Write(&'s mut ByteWriter),
}

impl Stream<'_, '_> {
    pub fn mode(&self) -> Mode {
        match self {
            Stream::Read(_) => Mode::Read,
            Stream::Write(_) => Mode::Write,
        }
    }
}

/// Handed to a layout callback for the duration of one pass.
///
/// Every primitive moves data in the direction of the pass, so one callback describes both
/// directions and the call order is the wire format.
pub struct Serializer<'s, 'a> {
    stream: Stream<'s, 'a>,
    version: FormatVersion,
}

impl<'s, 'a> Serializer<'s, 'a> {
    pub fn new(stream: Stream<'s, 'a>, version: FormatVersion) -> Self {
        Self { stream, version }
    }

    pub fn mode(&self) -> Mode {
        self.stream.mode()
    }

    pub fn is_read(&self) -> bool {
        self.mode() == Mode::Read
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    pub fn position(&self) -> usize {
        match &self.stream {
            Stream::Read(reader) => reader.get_offset(),
            Stream::Write(writer) => writer.get_offset(),
        }
    }

    pub fn seek(&mut self, position: usize) {
        match &mut self.stream {
            Stream::Read(reader) => reader.seek(position),
            Stream::Write(writer) => writer.seek(position),
        }
    }

    /// The underlying reader in a read pass.
    pub fn reader(&mut self) -> Option<&mut ByteReader<'a>> {
        match &mut self.stream {
            Stream::Read(reader) => Some(&mut **reader),
            Stream::Write(_) => None,
        }
    }

    fn reserve(writer: &ByteWriter, needed: usize) -> Result<(), SerialError> {
        if writer.can_write(needed) {
            return Ok(());
        }

        Err(SerialError::UnexpectedEndOfData {
            offset: writer.get_offset(),
            needed,
            remaining: writer.remaining().unwrap_or_default(),
        })
    }

    pub fn field<T: Field>(&mut self, value: &mut T) -> Result<(), SerialError> {
        match &mut self.stream {
            Stream::Read(reader) => {
                *value = reader.read::<T>()?;
            }
            Stream::Write(writer) => {
                Self::reserve(writer, T::SIZE)?;
                value.write(writer);
            }
        }

        Ok(())
    }

    /// Raw span of exactly `length` bytes. Writes pad with zeros or truncate.
    pub fn bytes(&mut self, buffer: &mut Vec<u8>, length: usize) -> Result<(), SerialError> {
        match &mut self.stream {
            Stream::Read(reader) => {
                let bytes = reader.read_bytes(length)?;

                buffer.clear();
                buffer.extend_from_slice(bytes);
            }
            Stream::Write(writer) => {
                Self::reserve(writer, length)?;

                let written = buffer.len().min(length);

                writer.append_u8_slice(&buffer[..written]);
                writer.append_zeros(length - written);
            }
        }

        Ok(())
    }

    /// `length` consecutive fields. Writes fill missing values with defaults.
    pub fn array<T: Field + Default>(
        &mut self,
        values: &mut Vec<T>,
        length: usize,
    ) -> Result<(), SerialError> {
        if self.is_read() {
            values.clear();
            values.resize_with(length, T::default);
        }

        for index in 0..length {
            match values.get_mut(index) {
                Some(value) => self.field(value)?,
                None => self.field(&mut T::default())?,
            }
        }

        Ok(())
    }

    /// NUL padded string in a fixed-width slot.
    ///
    /// Reading stops at the first NUL. Writing truncates to `length` bytes.
    pub fn fixed_string(&mut self, value: &mut String, length: usize) -> Result<(), SerialError> {
        let mut buffer = value.as_bytes().to_vec();

        self.bytes(&mut buffer, length)?;

        if self.is_read() {
            let end = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
            *value = String::from_utf8_lossy(&buffer[..end]).into_owned();
        }

        Ok(())
    }

    /// Nested records laid out by `f`, `length` of them.
    pub fn list<T, E, F>(&mut self, items: &mut Vec<T>, length: usize, mut f: F) -> Result<(), E>
    where
        T: Default,
        F: FnMut(&mut Self, &mut T) -> Result<(), E>,
    {
        if self.is_read() {
            items.clear();
            items.resize_with(length, T::default);
        }

        for index in 0..length {
            match items.get_mut(index) {
                Some(item) => f(self, item)?,
                None => f(self, &mut T::default())?,
            }
        }

        Ok(())
    }
}
