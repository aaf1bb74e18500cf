use byte_writer::ByteWriter;
use nom::{
    bytes::complete::take,
    combinator::map,
    number::complete::{le_f32, le_i16, le_i32, le_i8, le_u16, le_u32, le_u8},
    Parser,
};

pub type IResult<'a, T> = nom::IResult<&'a [u8], T>;

/// Fixed-size value with a little-endian wire form.
pub trait Field: Sized {
    const SIZE: usize;

    fn parse(i: &[u8]) -> IResult<'_, Self>;
    fn write(&self, writer: &mut ByteWriter);
}

macro_rules! impl_field {
    ($ty:ty, $parser:ident, $append:ident) => {
        impl Field for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();

            fn parse(i: &[u8]) -> IResult<'_, Self> {
                $parser(i)
            }

            fn write(&self, writer: &mut ByteWriter) {
                writer.$append(*self);
            }
        }
    };
}

impl_field!(u8, le_u8, append_u8);
impl_field!(i8, le_i8, append_i8);
impl_field!(u16, le_u16, append_u16);
impl_field!(i16, le_i16, append_i16);
impl_field!(u32, le_u32, append_u32);
impl_field!(i32, le_i32, append_i32);
impl_field!(f32, le_f32, append_f32);

impl<const N: usize> Field for [u8; N] {
    const SIZE: usize = N;

    fn parse(i: &[u8]) -> IResult<'_, Self> {
        map(take(N), |bytes: &[u8]| {
            let mut res = [0u8; N];
            res.copy_from_slice(bytes);
            res
        })
        .parse(i)
    }

    fn write(&self, writer: &mut ByteWriter) {
        writer.append_u8_slice(self);
    }
}
