// crates/country-card-core/src/flag.rs

//! # Flag Derivation
//!
//! A flag emoji is two Unicode *regional indicator symbols*, one per letter of
//! the country code. `A` maps to U+1F1E6, `B` to U+1F1E7 and so on, so the
//! mapping is plain arithmetic: no table, no locale.

/// Distance from an ASCII capital letter to its regional indicator symbol
/// (`0x1F1E6 - 'A'`).
pub const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Returns the flag emoji for a country code like `US`, `ch` or `NL`.
///
/// The input is uppercased first. Characters outside `A..=Z` still produce a
/// code point, it just isn't a regional indicator and renders as garbage;
/// callers are expected to pass codes from the country table. Sums that are
/// not valid scalar values become U+FFFD. This function never fails.
///
/// ```rust
/// use country_card_core::emoji_flag;
///
/// assert_eq!(emoji_flag("US"), "\u{1F1FA}\u{1F1F8}");
/// assert_eq!(emoji_flag("ch"), emoji_flag("CH"));
/// ```
pub fn emoji_flag(country_code: &str) -> String {
    country_code
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| {
            (c as u32)
                .checked_add(REGIONAL_INDICATOR_OFFSET)
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}
