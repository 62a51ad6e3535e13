// crates/country-card-core/src/text.rs
use deunicode::deunicode;

/// Fold a string for accent- and case-insensitive comparison.
///
/// `"Côte d'Ivoire"` and `"cote d'ivoire"` fold to the same key, so a user
/// typing into the country selector does not need to know the diacritics.
///
/// ```rust
/// use country_card_core::text::fold_key;
///
/// assert_eq!(fold_key("  Åland  "), "aland");
/// assert_eq!(fold_key("Curaçao"), fold_key("CURACAO"));
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode(s.trim()).to_ascii_lowercase()
}

/// `true` if the folded `haystack` contains the folded `needle`.
///
/// An empty needle matches everything.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(&fold_key(needle))
}
