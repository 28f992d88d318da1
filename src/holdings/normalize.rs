// Company-name normalization for cross-fund matching.
//
// Brokerage exports disagree on how they spell the same company
// ("Infosys" vs "Infosys Ltd"). Before two funds can be intersected, each
// name is reduced to a matching key: trim, strip one corporate-entity
// suffix, lower-case.
//
// Only the first suffix in list order that matches is stripped, and the
// suffix check is case-sensitive because lower-casing happens afterwards.
// "Foo Ltd" → "foo", but "Foo ltd" → "foo ltd". Changing either rule
// changes overlap results, so both are kept as-is.

/// Corporate-entity suffixes, checked in this order.
pub const ENTITY_SUFFIXES: &[&str] = &[
    "Ltd",
    "Limited",
    "Ordinary Shares",
    "Inc",
    "Corp",
    "Corporation",
];

/// Reduce a company name to its matching key.
///
/// An empty result is a valid key. Every name that strips to nothing
/// collides on it.
pub fn normalize(name: &str) -> String {
    let trimmed = name.trim();
    let stripped = ENTITY_SUFFIXES
        .iter()
        .find_map(|suffix| trimmed.strip_suffix(suffix))
        .map(str::trim)
        .unwrap_or(trimmed);
    stripped.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ltd() {
        assert_eq!(normalize("X Ltd"), "x");
        assert_eq!(normalize("X"), "x");
    }

    #[test]
    fn trims_before_suffix_check() {
        assert_eq!(normalize("  Infosys Ltd  "), "infosys");
    }

    #[test]
    fn only_first_matching_suffix_is_stripped() {
        // "Ltd" matches first; the exposed "Corp" stays.
        assert_eq!(normalize("Acme Corp Ltd"), "acme corp");
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        assert_eq!(normalize("XYZ ltd"), "xyz ltd");
    }

    #[test]
    fn bare_suffix_normalizes_to_empty() {
        assert_eq!(normalize("Ltd"), "");
        assert_eq!(normalize(""), "");
    }
}
