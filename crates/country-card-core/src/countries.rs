// crates/country-card-core/src/countries.rs

//! # Country Lookup Table
//!
//! The closed set of countries the block can show. Every [`CountryCode`] is
//! backed by a row of [`COUNTRIES`], so a code that made it through
//! [`CountryCode::parse`] always has a name, a continent and a flag.

use crate::error::{CardError, Result};
use crate::flag::emoji_flag;
use crate::text::{contains_folded, fold_key};
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// The seven continents, keyed by their two-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Continent {
    pub const ALL: [Continent; 7] = [
        Continent::Africa,
        Continent::Antarctica,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Oceania,
        Continent::SouthAmerica,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Continent::Africa => "AF",
            Continent::Antarctica => "AN",
            Continent::Asia => "AS",
            Continent::Europe => "EU",
            Continent::NorthAmerica => "NA",
            Continent::Oceania => "OC",
            Continent::SouthAmerica => "SA",
        }
    }

    /// English display name. Hosts localize it through [`crate::i18n`].
    pub fn name(self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Antarctica => "Antarctica",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::NorthAmerica => "North America",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
        }
    }

    /// Case-insensitive lookup by continent code (e.g. "EU", "na").
    pub fn from_code(code: &str) -> Option<Continent> {
        let code = code.trim();
        Continent::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the country table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryRecord {
    pub code: &'static str,
    pub name: &'static str,
    pub continent: Continent,
}

impl CountryRecord {
    pub fn flag(&self) -> String {
        emoji_flag(self.code)
    }
}

const fn row(code: &'static str, name: &'static str, continent: Continent) -> CountryRecord {
    CountryRecord {
        code,
        name,
        continent,
    }
}

use Continent::{
    Africa as AF, Antarctica as AN, Asia as AS, Europe as EU, NorthAmerica as NA, Oceania as OC,
    SouthAmerica as SA,
};

/// Every selectable country, sorted by code.
pub static COUNTRIES: &[CountryRecord] = &[
    row("AD", "Andorra", EU),
    row("AE", "United Arab Emirates", AS),
    row("AF", "Afghanistan", AS),
    row("AG", "Antigua and Barbuda", NA),
    row("AI", "Anguilla", NA),
    row("AL", "Albania", EU),
    row("AM", "Armenia", AS),
    row("AO", "Angola", AF),
    row("AQ", "Antarctica", AN),
    row("AR", "Argentina", SA),
    row("AS", "American Samoa", OC),
    row("AT", "Austria", EU),
    row("AU", "Australia", OC),
    row("AW", "Aruba", NA),
    row("AX", "Åland", EU),
    row("AZ", "Azerbaijan", AS),
    row("BA", "Bosnia and Herzegovina", EU),
    row("BB", "Barbados", NA),
    row("BD", "Bangladesh", AS),
    row("BE", "Belgium", EU),
    row("BF", "Burkina Faso", AF),
    row("BG", "Bulgaria", EU),
    row("BH", "Bahrain", AS),
    row("BI", "Burundi", AF),
    row("BJ", "Benin", AF),
    row("BL", "Saint Barthélemy", NA),
    row("BM", "Bermuda", NA),
    row("BN", "Brunei", AS),
    row("BO", "Bolivia", SA),
    row("BQ", "Bonaire", NA),
    row("BR", "Brazil", SA),
    row("BS", "Bahamas", NA),
    row("BT", "Bhutan", AS),
    row("BV", "Bouvet Island", AN),
    row("BW", "Botswana", AF),
    row("BY", "Belarus", EU),
    row("BZ", "Belize", NA),
    row("CA", "Canada", NA),
    row("CC", "Cocos (Keeling) Islands", AS),
    row("CD", "Democratic Republic of the Congo", AF),
    row("CF", "Central African Republic", AF),
    row("CG", "Republic of the Congo", AF),
    row("CH", "Switzerland", EU),
    row("CI", "Ivory Coast", AF),
    row("CK", "Cook Islands", OC),
    row("CL", "Chile", SA),
    row("CM", "Cameroon", AF),
    row("CN", "China", AS),
    row("CO", "Colombia", SA),
    row("CR", "Costa Rica", NA),
    row("CU", "Cuba", NA),
    row("CV", "Cape Verde", AF),
    row("CW", "Curaçao", NA),
    row("CX", "Christmas Island", AS),
    row("CY", "Cyprus", EU),
    row("CZ", "Czech Republic", EU),
    row("DE", "Germany", EU),
    row("DJ", "Djibouti", AF),
    row("DK", "Denmark", EU),
    row("DM", "Dominica", NA),
    row("DO", "Dominican Republic", NA),
    row("DZ", "Algeria", AF),
    row("EC", "Ecuador", SA),
    row("EE", "Estonia", EU),
    row("EG", "Egypt", AF),
    row("EH", "Western Sahara", AF),
    row("ER", "Eritrea", AF),
    row("ES", "Spain", EU),
    row("ET", "Ethiopia", AF),
    row("FI", "Finland", EU),
    row("FJ", "Fiji", OC),
    row("FK", "Falkland Islands", SA),
    row("FM", "Micronesia", OC),
    row("FO", "Faroe Islands", EU),
    row("FR", "France", EU),
    row("GA", "Gabon", AF),
    row("GB", "United Kingdom", EU),
    row("GD", "Grenada", NA),
    row("GE", "Georgia", AS),
    row("GF", "French Guiana", SA),
    row("GG", "Guernsey", EU),
    row("GH", "Ghana", AF),
    row("GI", "Gibraltar", EU),
    row("GL", "Greenland", NA),
    row("GM", "Gambia", AF),
    row("GN", "Guinea", AF),
    row("GP", "Guadeloupe", NA),
    row("GQ", "Equatorial Guinea", AF),
    row("GR", "Greece", EU),
    row("GS", "South Georgia and the South Sandwich Islands", AN),
    row("GT", "Guatemala", NA),
    row("GU", "Guam", OC),
    row("GW", "Guinea-Bissau", AF),
    row("GY", "Guyana", SA),
    row("HK", "Hong Kong", AS),
    row("HM", "Heard Island and McDonald Islands", AN),
    row("HN", "Honduras", NA),
    row("HR", "Croatia", EU),
    row("HT", "Haiti", NA),
    row("HU", "Hungary", EU),
    row("ID", "Indonesia", AS),
    row("IE", "Ireland", EU),
    row("IL", "Israel", AS),
    row("IM", "Isle of Man", EU),
    row("IN", "India", AS),
    row("IO", "British Indian Ocean Territory", AS),
    row("IQ", "Iraq", AS),
    row("IR", "Iran", AS),
    row("IS", "Iceland", EU),
    row("IT", "Italy", EU),
    row("JE", "Jersey", EU),
    row("JM", "Jamaica", NA),
    row("JO", "Jordan", AS),
    row("JP", "Japan", AS),
    row("KE", "Kenya", AF),
    row("KG", "Kyrgyzstan", AS),
    row("KH", "Cambodia", AS),
    row("KI", "Kiribati", OC),
    row("KM", "Comoros", AF),
    row("KN", "Saint Kitts and Nevis", NA),
    row("KP", "North Korea", AS),
    row("KR", "South Korea", AS),
    row("KW", "Kuwait", AS),
    row("KY", "Cayman Islands", NA),
    row("KZ", "Kazakhstan", AS),
    row("LA", "Laos", AS),
    row("LB", "Lebanon", AS),
    row("LC", "Saint Lucia", NA),
    row("LI", "Liechtenstein", EU),
    row("LK", "Sri Lanka", AS),
    row("LR", "Liberia", AF),
    row("LS", "Lesotho", AF),
    row("LT", "Lithuania", EU),
    row("LU", "Luxembourg", EU),
    row("LV", "Latvia", EU),
    row("LY", "Libya", AF),
    row("MA", "Morocco", AF),
    row("MC", "Monaco", EU),
    row("MD", "Moldova", EU),
    row("ME", "Montenegro", EU),
    row("MF", "Saint Martin", NA),
    row("MG", "Madagascar", AF),
    row("MH", "Marshall Islands", OC),
    row("MK", "North Macedonia", EU),
    row("ML", "Mali", AF),
    row("MM", "Myanmar", AS),
    row("MN", "Mongolia", AS),
    row("MO", "Macao", AS),
    row("MP", "Northern Mariana Islands", OC),
    row("MQ", "Martinique", NA),
    row("MR", "Mauritania", AF),
    row("MS", "Montserrat", NA),
    row("MT", "Malta", EU),
    row("MU", "Mauritius", AF),
    row("MV", "Maldives", AS),
    row("MW", "Malawi", AF),
    row("MX", "Mexico", NA),
    row("MY", "Malaysia", AS),
    row("MZ", "Mozambique", AF),
    row("NA", "Namibia", AF),
    row("NC", "New Caledonia", OC),
    row("NE", "Niger", AF),
    row("NF", "Norfolk Island", OC),
    row("NG", "Nigeria", AF),
    row("NI", "Nicaragua", NA),
    row("NL", "Netherlands", EU),
    row("NO", "Norway", EU),
    row("NP", "Nepal", AS),
    row("NR", "Nauru", OC),
    row("NU", "Niue", OC),
    row("NZ", "New Zealand", OC),
    row("OM", "Oman", AS),
    row("PA", "Panama", NA),
    row("PE", "Peru", SA),
    row("PF", "French Polynesia", OC),
    row("PG", "Papua New Guinea", OC),
    row("PH", "Philippines", AS),
    row("PK", "Pakistan", AS),
    row("PL", "Poland", EU),
    row("PM", "Saint Pierre and Miquelon", NA),
    row("PN", "Pitcairn Islands", OC),
    row("PR", "Puerto Rico", NA),
    row("PS", "Palestine", AS),
    row("PT", "Portugal", EU),
    row("PW", "Palau", OC),
    row("PY", "Paraguay", SA),
    row("QA", "Qatar", AS),
    row("RE", "Réunion", AF),
    row("RO", "Romania", EU),
    row("RS", "Serbia", EU),
    row("RU", "Russia", EU),
    row("RW", "Rwanda", AF),
    row("SA", "Saudi Arabia", AS),
    row("SB", "Solomon Islands", OC),
    row("SC", "Seychelles", AF),
    row("SD", "Sudan", AF),
    row("SE", "Sweden", EU),
    row("SG", "Singapore", AS),
    row("SH", "Saint Helena", AF),
    row("SI", "Slovenia", EU),
    row("SJ", "Svalbard and Jan Mayen", EU),
    row("SK", "Slovakia", EU),
    row("SL", "Sierra Leone", AF),
    row("SM", "San Marino", EU),
    row("SN", "Senegal", AF),
    row("SO", "Somalia", AF),
    row("SR", "Suriname", SA),
    row("SS", "South Sudan", AF),
    row("ST", "São Tomé and Príncipe", AF),
    row("SV", "El Salvador", NA),
    row("SX", "Sint Maarten", NA),
    row("SY", "Syria", AS),
    row("SZ", "Eswatini", AF),
    row("TC", "Turks and Caicos Islands", NA),
    row("TD", "Chad", AF),
    row("TF", "French Southern Territories", AN),
    row("TG", "Togo", AF),
    row("TH", "Thailand", AS),
    row("TJ", "Tajikistan", AS),
    row("TK", "Tokelau", OC),
    row("TL", "East Timor", OC),
    row("TM", "Turkmenistan", AS),
    row("TN", "Tunisia", AF),
    row("TO", "Tonga", OC),
    row("TR", "Turkey", AS),
    row("TT", "Trinidad and Tobago", NA),
    row("TV", "Tuvalu", OC),
    row("TW", "Taiwan", AS),
    row("TZ", "Tanzania", AF),
    row("UA", "Ukraine", EU),
    row("UG", "Uganda", AF),
    row("UM", "U.S. Minor Outlying Islands", OC),
    row("US", "United States", NA),
    row("UY", "Uruguay", SA),
    row("UZ", "Uzbekistan", AS),
    row("VA", "Vatican City", EU),
    row("VC", "Saint Vincent and the Grenadines", NA),
    row("VE", "Venezuela", SA),
    row("VG", "British Virgin Islands", NA),
    row("VI", "U.S. Virgin Islands", NA),
    row("VN", "Vietnam", AS),
    row("VU", "Vanuatu", OC),
    row("WF", "Wallis and Futuna", OC),
    row("WS", "Samoa", OC),
    row("XK", "Kosovo", EU),
    row("YE", "Yemen", AS),
    row("YT", "Mayotte", AF),
    row("ZA", "South Africa", AF),
    row("ZM", "Zambia", AF),
    row("ZW", "Zimbabwe", AF),
];

static BY_CODE: Lazy<HashMap<&'static str, &'static CountryRecord>> =
    Lazy::new(|| COUNTRIES.iter().map(|c| (c.code, c)).collect());

/// Find a country by code, case-insensitive (e.g. "CH", "ch", " ch ").
pub fn lookup_country(code: &str) -> Option<&'static CountryRecord> {
    let code = code.trim();
    if code.len() != 2 {
        return None;
    }
    BY_CODE.get(code.to_ascii_uppercase().as_str()).copied()
}

/// Display name for a continent code, or `None` if the code is unknown.
pub fn continent_name(continent_code: &str) -> Option<&'static str> {
    Continent::from_code(continent_code).map(Continent::name)
}

/// All countries in table order.
pub fn countries() -> impl Iterator<Item = &'static CountryRecord> {
    COUNTRIES.iter()
}

/// A validated member of the country table.
///
/// The only way to build one is [`CountryCode::parse`] (or deserializing,
/// which goes through it), so holding a `CountryCode` proves the code exists.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryCode(&'static CountryRecord);

impl CountryCode {
    pub fn parse(code: &str) -> Result<Self> {
        lookup_country(code)
            .map(CountryCode)
            .ok_or_else(|| CardError::UnknownCountry(code.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0.code
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }

    pub fn continent(&self) -> Continent {
        self.0.continent
    }

    pub fn record(&self) -> &'static CountryRecord {
        self.0
    }

    pub fn flag(&self) -> String {
        emoji_flag(self.0.code)
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.0.code)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.code)
    }
}

impl std::str::FromStr for CountryCode {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        CountryCode::parse(s)
    }
}

impl Serialize for CountryCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CountryCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// One entry of the country selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryOption {
    pub value: CountryCode,
    pub label: String,
}

/// Selector entries for every country: `"<flag> <name> — <code>"`.
pub fn country_options() -> Vec<CountryOption> {
    countries().map(option_for).collect()
}

/// Selector entries whose name or code loosely matches `query`.
///
/// Matching is accent- and case-insensitive; an empty query keeps everything.
pub fn filter_options(query: &str) -> Vec<CountryOption> {
    let q = fold_key(query);
    if q.is_empty() {
        return country_options();
    }
    countries()
        .filter(|c| contains_folded(c.name, &q) || fold_key(c.code) == q)
        .map(option_for)
        .collect()
}

fn option_for(record: &'static CountryRecord) -> CountryOption {
    CountryOption {
        value: CountryCode(record),
        label: format!("{} {} — {}", record.flag(), record.name, record.code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_unique_and_well_formed() {
        for pair in COUNTRIES.windows(2) {
            assert!(pair[0].code < pair[1].code, "{} !< {}", pair[0].code, pair[1].code);
        }
        for c in COUNTRIES {
            assert_eq!(c.code.len(), 2);
            assert!(c.code.bytes().all(|b| b.is_ascii_uppercase()), "{}", c.code);
            assert!(!c.name.is_empty());
        }
    }

    #[test]
    fn every_continent_has_a_name() {
        for c in COUNTRIES {
            assert!(continent_name(c.continent.code()).is_some(), "{}", c.code);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let ch = lookup_country("ch").unwrap();
        assert_eq!(ch.name, "Switzerland");
        assert_eq!(ch.continent, Continent::Europe);
        assert!(lookup_country("XX").is_none());
        assert!(lookup_country("").is_none());
        assert!(lookup_country("CHE").is_none());
    }

    #[test]
    fn continent_names() {
        assert_eq!(continent_name("NA"), Some("North America"));
        assert_eq!(continent_name("oc"), Some("Oceania"));
        assert_eq!(continent_name("ZZ"), None);
    }

    #[test]
    fn country_code_rejects_unknown() {
        assert!(matches!(
            CountryCode::parse("QQ"),
            Err(CardError::UnknownCountry(code)) if code == "QQ"
        ));
        let us: CountryCode = "us".parse().unwrap();
        assert_eq!(us.as_str(), "US");
        assert_eq!(us.name(), "United States");
    }

    #[test]
    fn country_code_serde() {
        let code: CountryCode = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"DE\"");
        assert!(serde_json::from_str::<CountryCode>("\"ZZ\"").is_err());
    }

    #[test]
    fn options_label_flag_name_and_code() {
        let options = country_options();
        assert_eq!(options.len(), COUNTRIES.len());
        let ch = options.iter().find(|o| o.value.as_str() == "CH").unwrap();
        assert_eq!(ch.label, "\u{1F1E8}\u{1F1ED} Switzerland — CH");
    }

    #[test]
    fn filter_options_folds_accents() {
        let hits = filter_options("reunion");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].value.as_str(), "RE");

        let by_code = filter_options("nz");
        assert!(by_code.iter().any(|o| o.value.as_str() == "NZ"));

        assert_eq!(filter_options("").len(), COUNTRIES.len());
    }
}
