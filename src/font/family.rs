use super::Font;
use fonty_variant::{VariantAttribute, VariantSelection, contains, select};
use itertools::Itertools;
use std::fmt;

/// Fonts sharing one family name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    pub name: String,
    pub fonts: Vec<Font>,
}

impl FontFamily {
    pub fn new(name: impl Into<String>, fonts: Vec<Font>) -> Self {
        Self {
            name: name.into(),
            fonts,
        }
    }

    pub fn variants(&self) -> Vec<&VariantAttribute> {
        self.fonts.iter().map(|f| &f.variant).collect()
    }

    /// Fonts whose variant is in `requested`; every font when `requested` is empty.
    pub fn get_fonts(&self, requested: &[VariantAttribute]) -> Vec<&Font> {
        if requested.is_empty() {
            return self.fonts.iter().collect();
        }
        self.fonts
            .iter()
            .filter(|f| contains(requested, &f.variant))
            .collect()
    }

    /// Like [`get_fonts`](Self::get_fonts) but also reports requested variants
    /// the family does not have.
    pub fn select(&self, requested: &[VariantAttribute]) -> VariantSelection<'_, Font> {
        select(&self.fonts, requested)
    }

    /// Groups fonts by family name. Families come back sorted by name, and
    /// fonts inside a family keep their input order.
    pub fn from_font_list(fonts: Vec<Font>) -> Vec<FontFamily> {
        fonts
            .into_iter()
            .into_group_map_by(|f| f.family.clone())
            .into_iter()
            .sorted_by(|(a, _), (b, _)| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)))
            .map(|(name, fonts)| FontFamily::new(name, fonts))
            .collect()
    }
}

/// Renders the family as a small tree: the name, then one line per font.
impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        let last = self.fonts.len().saturating_sub(1);
        for (i, font) in self.fonts.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            writeln!(
                f,
                "  {} {} ({})",
                branch,
                font.variant.to_long_string(),
                font.path.display()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fonty_variant::parse_variant_list;

    fn font(family: &str, variant: &str) -> Font {
        Font::new(
            format!("/fonts/{}-{}.ttf", family, variant),
            family,
            VariantAttribute::parse(variant),
        )
    }

    fn roboto() -> FontFamily {
        FontFamily::new(
            "Roboto",
            vec![font("Roboto", "400"), font("Roboto", "400i"), font("Roboto", "700")],
        )
    }

    #[test]
    fn test_get_fonts_empty_request_returns_all() {
        assert_eq!(roboto().get_fonts(&[]).len(), 3);
    }

    #[test]
    fn test_get_fonts_matches_across_notations() {
        let family = roboto();
        let requested = parse_variant_list(["Bold", "Regular Italic"]);
        let fonts = family.get_fonts(&requested);
        let short: Vec<String> = fonts.iter().map(|f| f.variant.to_short_string()).collect();
        assert_eq!(short, vec!["400i", "700"]);
    }

    #[test]
    fn test_select_reports_missing_variants() {
        let family = roboto();
        let selection = family.select(&parse_variant_list(["700,800"]));
        assert_eq!(selection.matched.len(), 1);
        assert_eq!(selection.invalid_names(), vec!["800"]);
    }

    #[test]
    fn test_from_font_list_groups_and_sorts() {
        let fonts = vec![
            font("Roboto", "700"),
            font("Lato", "400"),
            font("Roboto", "400"),
            font("arvo", "400"),
        ];
        let families = FontFamily::from_font_list(fonts);
        let names: Vec<&str> = families.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["arvo", "Lato", "Roboto"]);
        let roboto: Vec<String> = families[2].variants().iter().map(|v| v.to_short_string()).collect();
        assert_eq!(roboto, vec!["700", "400"]);
    }

    #[test]
    fn test_display_tree() {
        let text = FontFamily::new("Lato", vec![font("Lato", "400"), font("Lato", "700i")]).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Lato");
        assert!(lines[1].starts_with("  ├─ Regular"));
        assert!(lines[2].starts_with("  └─ BoldItalic"));
    }
}
