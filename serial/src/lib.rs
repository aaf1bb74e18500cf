//! Versioned, bidirectional serialization for genie engine records.
//!
//! A record implements [`Versioned`] once. Its `layout` issues [`Serializer`] primitives in
//! wire order and [`run_pass`] drives it against either a [`ByteReader`] or a
//! [`ByteWriter`], so reading and writing can never disagree on field order.
pub mod error;
mod field;
mod reader;
mod serializer;
mod version;

pub use byte_writer::ByteWriter;
pub use error::SerialError;
pub use field::{Field, IResult};
pub use reader::ByteReader;
pub use serializer::{Mode, Serializer, Stream};
pub use version::FormatVersion;

pub trait Versioned {
    type Error: From<SerialError>;

    /// Name used in error messages.
    const NAME: &'static str;

    fn format_version(&self) -> FormatVersion {
        FormatVersion::LATEST
    }

    fn supports(_version: FormatVersion) -> bool {
        true
    }

    fn layout(&mut self, s: &mut Serializer<'_, '_>) -> Result<(), Self::Error>;
}

pub fn run_pass<T: Versioned>(entity: &mut T, stream: Stream<'_, '_>) -> Result<(), T::Error> {
    let version = entity.format_version();

    if !T::supports(version) {
        return Err(SerialError::UnsupportedVersion {
            entity: T::NAME,
            version,
        }
        .into());
    }

    let mut s = Serializer::new(stream, version);
    let start = s.position();

    log::trace!("{:?} pass over {} ({version}) at {start}", s.mode(), T::NAME);

    entity.layout(&mut s)?;

    log::trace!("{} pass done at {}", T::NAME, s.position());

    Ok(())
}

pub fn read_entity<T: Versioned>(entity: &mut T, reader: &mut ByteReader) -> Result<(), T::Error> {
    run_pass(entity, Stream::Read(reader))
}

pub fn write_entity<T: Versioned>(entity: &mut T, writer: &mut ByteWriter) -> Result<(), T::Error> {
    run_pass(entity, Stream::Write(writer))
}
