//! Weight, style and stretch enums plus the composite `VariantAttribute`.
//!
//! Each enum value maps to a fixed `Descriptor` record (display name, short id,
//! CSS keyword, hidden flag). The records live in static tables indexed by the
//! enum discriminant.

use crate::parser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Static metadata attached to a weight, style or stretch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Human readable name, used by the long print form.
    pub name: &'static str,
    /// Short id, used by the canonical print form.
    pub id: &'static str,
    /// Value for the matching CSS `@font-face` descriptor.
    pub css: &'static str,
    /// Hidden values are omitted when printing.
    pub hidden: bool,
}

const fn descriptor(name: &'static str, id: &'static str, css: &'static str, hidden: bool) -> Descriptor {
    Descriptor { name, id, css, hidden }
}

/// Shared accessors for the attribute enums.
pub trait Described: Copy {
    fn descriptor(self) -> &'static Descriptor;

    fn name(self) -> &'static str {
        self.descriptor().name
    }

    fn id(self) -> &'static str {
        self.descriptor().id
    }

    fn css(self) -> &'static str {
        self.descriptor().css
    }

    fn is_hidden(self) -> bool {
        self.descriptor().hidden
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FontWeight {
    Thin,
    ExtraLight,
    Light,
    #[default]
    Regular,
    Medium,
    SemiBold,
    Bold,
    ExtraBold,
    Black,
}

static WEIGHTS: [Descriptor; 9] = [
    descriptor("Thin", "100", "100", false),
    descriptor("ExtraLight", "200", "200", false),
    descriptor("Light", "300", "300", false),
    descriptor("Regular", "400", "400", false),
    descriptor("Medium", "500", "500", false),
    descriptor("Semibold", "600", "600", false),
    descriptor("Bold", "700", "700", false),
    descriptor("Extrabold", "800", "800", false),
    descriptor("Black", "900", "900", false),
];

impl FontWeight {
    pub const ALL: [FontWeight; 9] = [
        FontWeight::Thin,
        FontWeight::ExtraLight,
        FontWeight::Light,
        FontWeight::Regular,
        FontWeight::Medium,
        FontWeight::SemiBold,
        FontWeight::Bold,
        FontWeight::ExtraBold,
        FontWeight::Black,
    ];

    /// Returns the numeric weight value (100-900 scale).
    pub fn numeric_value(self) -> u16 {
        (self as u16 + 1) * 100
    }

    /// Looks up a three digit CSS weight code such as `"700"`.
    pub fn from_css(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.css() == code)
    }
}

impl Described for FontWeight {
    fn descriptor(self) -> &'static Descriptor {
        &WEIGHTS[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

static STYLES: [Descriptor; 3] = [
    descriptor("Normal", "", "normal", true),
    descriptor("Italic", "i", "italic", false),
    descriptor("Oblique", "o", "oblique", false),
];

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Normal, FontStyle::Italic, FontStyle::Oblique];
}

impl Described for FontStyle {
    fn descriptor(self) -> &'static Descriptor {
        &STYLES[self as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStretch {
    #[default]
    Normal,
    Condensed,
    Expanded,
}

static STRETCHES: [Descriptor; 3] = [
    descriptor("Normal", "normal", "normal", true),
    descriptor("Condensed", "condensed", "condensed", false),
    descriptor("Expanded", "expanded", "expanded", false),
];

impl FontStretch {
    pub const ALL: [FontStretch; 3] = [
        FontStretch::Normal,
        FontStretch::Condensed,
        FontStretch::Expanded,
    ];
}

impl Described for FontStretch {
    fn descriptor(self) -> &'static Descriptor {
        &STRETCHES[self as usize]
    }
}

/// The canonical description of one font variant.
///
/// Values are immutable once built. Two attributes are equal when their
/// canonical short strings are equal, so `misc` text takes part in equality
/// while the original `raw` input does not.
#[derive(Debug, Clone, Default)]
pub struct VariantAttribute {
    weight: FontWeight,
    style: FontStyle,
    stretch: FontStretch,
    misc: String,
    raw: String,
}

impl VariantAttribute {
    pub fn new(weight: FontWeight, style: FontStyle, stretch: FontStretch) -> Self {
        Self {
            weight,
            style,
            stretch,
            misc: String::new(),
            raw: String::new(),
        }
    }

    pub(crate) fn from_parts(
        weight: FontWeight,
        style: FontStyle,
        stretch: FontStretch,
        misc: String,
        raw: String,
    ) -> Self {
        Self {
            weight,
            style,
            stretch,
            misc,
            raw,
        }
    }

    /// Parses any variant string. Never fails; see [`parser::parse`].
    pub fn parse(input: &str) -> Self {
        parser::parse(input)
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn stretch(&self) -> FontStretch {
        self.stretch
    }

    /// Unparsed residual text.
    pub fn misc(&self) -> &str {
        &self.misc
    }

    /// The lowercased input this attribute was parsed from, empty when built directly.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Renders the attribute. The short form (`long == false`) is the canonical string.
    ///
    /// Weight and style are concatenated, then stretch and misc follow, all
    /// joined with `_`. Hidden values and an empty misc are left out.
    pub fn print(&self, long: bool) -> String {
        let pick = |d: &'static Descriptor| match (d.hidden, long) {
            (true, _) => "",
            (false, true) => d.name,
            (false, false) => d.id,
        };

        let head = format!(
            "{}{}",
            pick(self.weight.descriptor()),
            pick(self.style.descriptor())
        );
        [head.as_str(), pick(self.stretch.descriptor()), self.misc.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_")
    }

    pub fn to_short_string(&self) -> String {
        self.print(false)
    }

    pub fn to_long_string(&self) -> String {
        self.print(true)
    }
}

impl PartialEq for VariantAttribute {
    fn eq(&self, other: &Self) -> bool {
        self.to_short_string() == other.to_short_string()
    }
}

impl Eq for VariantAttribute {}

impl Hash for VariantAttribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_short_string().hash(state);
    }
}

impl fmt::Display for VariantAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_short_string())
    }
}

impl FromStr for VariantAttribute {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parser::parse(s))
    }
}

impl Serialize for VariantAttribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_short_string())
    }
}

impl<'de> Deserialize<'de> for VariantAttribute {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(parser::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_numeric_values_follow_declaration_order() {
        let values: Vec<u16> = FontWeight::ALL.iter().map(|w| w.numeric_value()).collect();
        assert_eq!(values, vec![100, 200, 300, 400, 500, 600, 700, 800, 900]);
    }

    #[test]
    fn test_weight_from_css() {
        assert_eq!(FontWeight::from_css("100"), Some(FontWeight::Thin));
        assert_eq!(FontWeight::from_css("600"), Some(FontWeight::SemiBold));
        assert_eq!(FontWeight::from_css("000"), None);
        assert_eq!(FontWeight::from_css("bold"), None);
    }

    #[test]
    fn test_only_normal_values_are_hidden() {
        assert!(FontWeight::ALL.iter().all(|w| !w.is_hidden()));
        assert!(FontStyle::Normal.is_hidden());
        assert!(!FontStyle::Italic.is_hidden());
        assert!(FontStretch::Normal.is_hidden());
        assert!(!FontStretch::Condensed.is_hidden());
    }

    #[test]
    fn test_short_form_keeps_regular_weight() {
        let attr = VariantAttribute::default();
        assert_eq!(attr.to_short_string(), "400");
        assert_eq!(attr.to_long_string(), "Regular");
    }

    #[test]
    fn test_short_and_long_forms() {
        let attr = VariantAttribute::new(FontWeight::Bold, FontStyle::Italic, FontStretch::Condensed);
        assert_eq!(attr.to_short_string(), "700i_condensed");
        assert_eq!(attr.to_long_string(), "BoldItalic_Condensed");
    }

    #[test]
    fn test_misc_is_appended_last() {
        let attr = VariantAttribute::from_parts(
            FontWeight::Light,
            FontStyle::Normal,
            FontStretch::Expanded,
            "display".into(),
            String::new(),
        );
        assert_eq!(attr.to_short_string(), "300_expanded_display");
        assert_eq!(attr.to_long_string(), "Light_Expanded_display");
    }

    #[test]
    fn test_equality_ignores_raw_text() {
        let a = VariantAttribute::from_parts(
            FontWeight::Bold,
            FontStyle::Normal,
            FontStretch::Normal,
            String::new(),
            "bold".into(),
        );
        let b = VariantAttribute::from_parts(
            FontWeight::Bold,
            FontStyle::Normal,
            FontStretch::Normal,
            String::new(),
            "700".into(),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let attr = VariantAttribute::new(FontWeight::Black, FontStyle::Oblique, FontStretch::Normal);
        let json = serde_json::to_string(&attr).unwrap();
        assert_eq!(json, "\"900o\"");

        let back: VariantAttribute = serde_json::from_str("\"Black Oblique\"").unwrap();
        assert_eq!(back, attr);
    }
}
