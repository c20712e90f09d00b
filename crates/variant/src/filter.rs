//! Variant equality helpers and request filtering.

use crate::attribute::VariantAttribute;

/// Anything that carries a variant: fonts, catalogue entries, manifest records.
pub trait HasVariant {
    fn variant(&self) -> &VariantAttribute;
}

impl HasVariant for VariantAttribute {
    fn variant(&self) -> &VariantAttribute {
        self
    }
}

/// Canonical-string equality.
pub fn equals(a: &VariantAttribute, b: &VariantAttribute) -> bool {
    a.to_short_string() == b.to_short_string()
}

/// Membership by canonical-string equality.
pub fn contains(list: &[VariantAttribute], target: &VariantAttribute) -> bool {
    list.iter().any(|v| equals(v, target))
}

/// Parses user supplied variant arguments.
///
/// Each argument may hold several comma separated variants
/// (`["700,700i", "400"]`). Blank entries are skipped.
pub fn parse_variant_list<I, S>(inputs: I) -> Vec<VariantAttribute>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .flat_map(|arg| {
            arg.as_ref()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(VariantAttribute::parse)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Result of matching requested variants against candidates.
#[derive(Debug)]
pub struct VariantSelection<'a, T> {
    /// Candidates whose variant was requested, in candidate order.
    pub matched: Vec<&'a T>,
    /// Requested variants no candidate provides, deduplicated, in request order.
    pub invalid: Vec<VariantAttribute>,
}

impl<T> VariantSelection<'_, T> {
    pub fn is_complete(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Canonical strings of the invalid variants, for error messages.
    pub fn invalid_names(&self) -> Vec<String> {
        self.invalid.iter().map(|v| v.to_short_string()).collect()
    }
}

/// Filters `candidates` down to the requested variants.
///
/// An empty request selects every candidate.
pub fn select<'a, T: HasVariant>(
    candidates: &'a [T],
    requested: &[VariantAttribute],
) -> VariantSelection<'a, T> {
    if requested.is_empty() {
        return VariantSelection {
            matched: candidates.iter().collect(),
            invalid: Vec::new(),
        };
    }

    let matched = candidates
        .iter()
        .filter(|c| contains(requested, c.variant()))
        .collect();

    let mut invalid: Vec<VariantAttribute> = Vec::new();
    for wanted in requested {
        let available = candidates.iter().any(|c| equals(c.variant(), wanted));
        if !available && !contains(&invalid, wanted) {
            invalid.push(wanted.clone());
        }
    }

    VariantSelection { matched, invalid }
}
