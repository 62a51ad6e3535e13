// crates/country-card-core/src/model.rs

//! Block attributes: the only durable state of a country card.

use crate::countries::CountryCode;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a post. Hosts hand out numbers; some REST shims stringify them.
///
/// Numbers that are not non-negative integers (`-3`, `7.5`) are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PostId {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Unsigned(u64),
            Signed(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Unsigned(n) => PostId::Number(n),
            Raw::Signed(n) => PostId::Text(n.to_string()),
            Raw::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
                PostId::Number(f as u64)
            }
            Raw::Float(f) => PostId::Text(f.to_string()),
            Raw::Text(s) => PostId::Text(s),
        })
    }
}

impl PostId {
    /// Numeric-aware equality: `Number(7)` and `Text("7")` name the same post.
    pub fn same_post(&self, other: &PostId) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    fn as_number(&self) -> Option<u64> {
        match self {
            PostId::Number(n) => Some(*n),
            PostId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<u64> for PostId {
    fn from(n: u64) -> Self {
        PostId::Number(n)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        PostId::Text(s.to_string())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{n}"),
            PostId::Text(s) => f.write_str(s),
        }
    }
}

/// A post shown in the card footer.
///
/// `excerpt` is host-rendered HTML and is emitted verbatim; `title` is text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPost {
    pub id: PostId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
}

/// `null` reads as `""`. Pair with `#[serde(default)]` for missing keys.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Persisted state of one block instance.
///
/// Serialized with camelCase keys (`countryCode`, `relatedPosts`). An empty
/// `countryCode` string reads as "no country yet", and so does a code the
/// country table no longer knows, so stored blocks always render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAttributes {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_code_as_none"
    )]
    pub country_code: Option<CountryCode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_posts: Vec<RelatedPost>,
}

impl BlockAttributes {
    pub fn for_country(code: CountryCode) -> Self {
        Self {
            country_code: Some(code),
            related_posts: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country_code.is_none() && self.related_posts.is_empty()
    }
}

fn empty_code_as_none<'de, D>(deserializer: D) -> Result<Option<CountryCode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(code) => match CountryCode::parse(code) {
            Ok(code) => Ok(Some(code)),
            Err(e) => {
                warn!("dropping stored country code: {e}");
                Ok(None)
            }
        },
    }
}
