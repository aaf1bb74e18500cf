use nom::{bytes::complete::take, Parser};

use crate::{error::SerialError, field::Field, field::IResult};

/// Seekable read cursor over a borrowed byte source.
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }

    /// Seeking past the end is allowed, the next read fails instead.
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    fn rest(&self) -> &'a [u8] {
        self.data.get(self.offset..).unwrap_or(&[])
    }

    fn underrun(&self, needed: usize) -> SerialError {
        SerialError::UnexpectedEndOfData {
            offset: self.offset,
            needed,
            remaining: self.remaining(),
        }
    }

    fn run<T>(
        &mut self,
        needed: usize,
        parser: impl FnOnce(&'a [u8]) -> IResult<'a, T>,
    ) -> Result<T, SerialError> {
        let input = self.rest();

        match parser(input) {
            Ok((rest, res)) => {
                self.offset += input.len() - rest.len();
                Ok(res)
            }
            Err(_) => Err(self.underrun(needed)),
        }
    }

    pub fn read<T: Field>(&mut self) -> Result<T, SerialError> {
        self.run(T::SIZE, T::parse)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8], SerialError> {
        self.run(length, |i| take(length).parse(i))
    }

    /// Moves forward without looking at the bytes. Fails the same way a read would.
    pub fn skip(&mut self, length: usize) -> Result<(), SerialError> {
        self.read_bytes(length).map(|_| ())
    }
}
