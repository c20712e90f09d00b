//! Font variant normalization and matching.
//!
//! Font files, repository catalogues and command line flags all describe
//! variants differently (`"700i"`, `"Bold Italic"`, `"Negrita Cursiva"`).
//! This crate parses them into one canonical [`VariantAttribute`] so the rest
//! of fonty can compare variants without looking at raw strings.
//!
//! ```
//! use fonty_variant::{FontStyle, FontWeight, VariantAttribute};
//!
//! let attr = VariantAttribute::parse("Bold Italic");
//! assert_eq!(attr.weight(), FontWeight::Bold);
//! assert_eq!(attr.style(), FontStyle::Italic);
//! assert_eq!(attr.to_short_string(), "700i");
//! assert_eq!(attr, VariantAttribute::parse("700i"));
//! ```

pub mod attribute;
pub mod filter;
pub mod parser;

pub use attribute::{Described, Descriptor, FontStretch, FontStyle, FontWeight, VariantAttribute};
pub use filter::{HasVariant, VariantSelection, contains, equals, parse_variant_list, select};
pub use parser::parse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form_round_trip_for_every_combination() {
        for weight in FontWeight::ALL {
            for style in FontStyle::ALL {
                for stretch in FontStretch::ALL {
                    let attr = VariantAttribute::new(weight, style, stretch);
                    let canonical = attr.to_short_string();
                    let reparsed = parse(&canonical);

                    assert_eq!(reparsed.to_short_string(), canonical, "{weight:?} {style:?} {stretch:?}");
                    assert_eq!(reparsed.weight(), weight);
                    assert_eq!(reparsed.style(), style);
                    assert_eq!(reparsed.stretch(), stretch);
                    assert_eq!(reparsed.misc(), "");
                }
            }
        }
    }

    #[test]
    fn test_long_form_reparses_to_same_attribute() {
        for weight in FontWeight::ALL {
            for style in FontStyle::ALL {
                for stretch in FontStretch::ALL {
                    let attr = VariantAttribute::new(weight, style, stretch);
                    assert_eq!(parse(&attr.to_long_string()), attr, "{}", attr.to_long_string());
                }
            }
        }
    }

    #[test]
    fn test_canonical_string_is_stable_with_misc() {
        let attr = parse("700i_condensed_display");
        assert_eq!(attr.misc(), "display");
        let again = parse(&attr.to_short_string());
        assert_eq!(again.to_short_string(), attr.to_short_string());
    }
}
