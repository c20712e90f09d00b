//! Variant string parser.
//!
//! Two grammars compete:
//! - CSS numeric (`"700i"`, `"300_condensed"`), selected when the normalized
//!   input starts with a digit followed by `00`.
//! - Descriptive words (`"Bold Italic"`, `"Hairline"`), everything else.
//!
//! Parsing is total: unknown text ends up in `misc` and missing fields keep
//! their defaults.

use crate::attribute::{FontStretch, FontStyle, FontWeight, VariantAttribute};
use nom::{
    IResult, Parser,
    bytes::complete::{tag, take_while_m_n},
    character::complete::satisfy,
    combinator::{opt, recognize, rest},
    error::{Error, ErrorKind},
};

/// Weight keywords in match priority order, aliases after canonical names.
pub static WEIGHT_KEYWORDS: &[(&str, FontWeight)] = &[
    ("thin", FontWeight::Thin),
    ("extralight", FontWeight::ExtraLight),
    ("light", FontWeight::Light),
    ("regular", FontWeight::Regular),
    ("medium", FontWeight::Medium),
    ("semibold", FontWeight::SemiBold),
    ("bold", FontWeight::Bold),
    ("extrabold", FontWeight::ExtraBold),
    ("black", FontWeight::Black),
    ("hairline", FontWeight::Thin),
    ("ultralight", FontWeight::ExtraLight),
    ("book", FontWeight::Regular),
    ("roman", FontWeight::Regular),
    ("normal", FontWeight::Regular),
    ("demibold", FontWeight::SemiBold),
    ("negreta", FontWeight::Bold),
    ("negrita", FontWeight::Bold),
    ("ultrabold", FontWeight::ExtraBold),
    ("heavy", FontWeight::Black),
    ("script", FontWeight::Regular),
];

pub static STYLE_KEYWORDS: &[(&str, FontStyle)] = &[
    ("italic", FontStyle::Italic),
    ("cursiva", FontStyle::Italic),
    ("slanted", FontStyle::Oblique),
    ("oblique", FontStyle::Oblique),
];

/// Single letter style codes of the CSS grammar.
pub static CSS_STYLE_CODES: &[(&str, FontStyle)] =
    &[("i", FontStyle::Italic), ("o", FontStyle::Oblique)];

/// Shared by both grammars.
pub static STRETCH_KEYWORDS: &[(&str, FontStretch)] = &[
    ("condensed", FontStretch::Condensed),
    ("extended", FontStretch::Expanded),
    ("expanded", FontStretch::Expanded),
    ("stretch", FontStretch::Expanded),
];

/// Parses a variant string into a [`VariantAttribute`].
pub fn parse(input: &str) -> VariantAttribute {
    let raw = input.to_lowercase();
    let normalized = normalize(&raw);

    let (weight, style, stretch, misc) = if is_css_format(&normalized) {
        parse_css(&normalized)
    } else {
        parse_descriptive(&normalized)
    };

    VariantAttribute::from_parts(weight, style, stretch, misc, raw)
}

/// Drops whitespace and underscores from an already lowercased string.
fn normalize(lowercased: &str) -> String {
    lowercased
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect()
}

fn is_css_format(input: &str) -> bool {
    let prefix: IResult<&str, &str> =
        recognize((satisfy(|c| c.is_ascii_digit()), tag("00"))).parse(input);
    prefix.is_ok()
}

// --- CSS grammar ---

/// Matches the first keyword of `table` that prefixes the input.
fn keyword<'a, T: Copy>(
    table: &'static [(&'static str, T)],
) -> impl Fn(&'a str) -> IResult<&'a str, T> {
    move |input: &'a str| {
        table
            .iter()
            .find(|(word, _)| input.starts_with(word))
            .map(|(word, value)| (&input[word.len()..], *value))
            .ok_or_else(|| nom::Err::Error(Error::new(input, ErrorKind::Tag)))
    }
}

fn css_weight(input: &str) -> IResult<&str, Option<FontWeight>> {
    take_while_m_n(3, 3, |c: char| c.is_ascii_digit())
        .map(FontWeight::from_css)
        .parse(input)
}

#[allow(clippy::type_complexity)]
fn css_variant(
    input: &str,
) -> IResult<&str, (Option<FontWeight>, Option<FontStyle>, Option<FontStretch>, &str)> {
    (
        css_weight,
        opt(keyword(CSS_STYLE_CODES)),
        opt(keyword(STRETCH_KEYWORDS)),
        rest,
    )
        .parse(input)
}

fn parse_css(input: &str) -> (FontWeight, FontStyle, FontStretch, String) {
    match css_variant(input) {
        Ok((_, (weight, style, stretch, misc))) => (
            weight.unwrap_or_default(),
            style.unwrap_or_default(),
            stretch.unwrap_or_default(),
            misc.to_string(),
        ),
        Err(_) => Default::default(),
    }
}

// --- Descriptive grammar ---

/// Finds the earliest keyword occurrence and removes every copy of it.
///
/// At a given position keywords are tried in table order. Returns the matched
/// value (if any) and the remaining text.
fn extract<T: Copy>(input: &str, table: &[(&str, T)]) -> (Option<T>, String) {
    for (start, _) in input.char_indices() {
        let tail = &input[start..];
        if let Some((word, value)) = table.iter().find(|(word, _)| tail.starts_with(word)) {
            return (Some(*value), input.replace(word, ""));
        }
    }
    (None, input.to_string())
}

fn parse_descriptive(input: &str) -> (FontWeight, FontStyle, FontStretch, String) {
    // Order matters: each step only sees what the previous one left behind.
    let (weight, remainder) = extract(input, WEIGHT_KEYWORDS);
    let (style, remainder) = extract(&remainder, STYLE_KEYWORDS);
    let (stretch, remainder) = extract(&remainder, STRETCH_KEYWORDS);

    (
        weight.unwrap_or_default(),
        style.unwrap_or_default(),
        stretch.unwrap_or_default(),
        remainder,
    )
}
