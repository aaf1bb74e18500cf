use std::str::FromStr;

use nom::{
    bytes::complete::tag,
    character::complete::{digit1, line_ending, space0, space1},
    combinator::{eof, map, map_res},
    sequence::{preceded, terminated},
    IResult as _IResult, Parser,
};

use crate::{error::PaletteError, Color, ColorPalette};

type IResult<'a, T> = _IResult<&'a str, T>;

/// Lines taken by the header.
const HEADER_LINES: usize = 3;

fn number<T: FromStr>(i: &str) -> IResult<'_, T> {
    map_res(digit1, |s: &str| s.parse::<T>()).parse(i)
}

/// Returns the declared color count.
fn parse_header(i: &str) -> IResult<'_, usize> {
    preceded(
        (tag("JASC-PAL"), line_ending, tag("0100"), line_ending),
        terminated(number::<usize>, (space0, line_ending)),
    )
    .parse(i)
}

fn parse_color(i: &str) -> IResult<'_, Color> {
    map(
        (
            preceded(space0, number::<u8>),
            preceded(space1, number::<u8>),
            preceded(space1, number::<u8>),
            space0,
            eof,
        ),
        |(r, g, b, _, _)| Color::rgb(r, g, b),
    )
    .parse(i)
}

pub fn parse_palette(i: &str) -> Result<ColorPalette, PaletteError> {
    let (rest, color_count) = parse_header(i).map_err(|_| PaletteError::ParseHeader)?;

    let mut lines = rest.lines().enumerate();
    let mut colors = Vec::with_capacity(color_count.min(256));

    for (index, line) in lines.by_ref().take(color_count) {
        let (_, color) = parse_color(line).map_err(|_| PaletteError::ParseColor {
            line: index + HEADER_LINES + 1,
        })?;

        colors.push(color);
    }

    if colors.len() != color_count {
        return Err(PaletteError::MismatchedColorCount {
            expect: color_count,
            have: colors.len(),
        });
    }

    let extra = lines.filter(|(_, line)| !line.trim().is_empty()).count();

    if extra > 0 {
        log::warn!("Ignoring {extra} lines after the last of {color_count} palette colors");
    }

    Ok(ColorPalette { colors })
}
