// crates/country-card-core/src/block.rs

//! # Block Type & Registry
//!
//! The block's metadata, its `{edit, save}` render pair, the process-wide
//! registry the host reads them from, and the comment-delimited form the
//! host stores the block in.

use crate::error::{CardError, Result};
use crate::i18n::{English, TEXT_DOMAIN};
use crate::model::BlockAttributes;
use crate::render::{render_card, save, BLOCK_CLASS};
use log::info;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::BTreeMap;

pub const BLOCK_NAME: &str = "xwp/country-card";

/// Renders a block for editing. The flag says whether posts are loading.
pub type EditFn = fn(&BlockAttributes, bool) -> String;
/// Renders the markup stored in the document.
pub type SaveFn = fn(&BlockAttributes) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Array,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    #[serde(rename = "type")]
    pub kind: AttributeKind,
}

/// The `block.json` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMetadata {
    pub api_version: u8,
    pub name: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub icon: String,
    pub text_domain: String,
    pub attributes: BTreeMap<String, AttributeSchema>,
}

impl BlockMetadata {
    pub fn country_card(name: &str) -> Self {
        let attributes = [
            ("countryCode", AttributeKind::String),
            ("relatedPosts", AttributeKind::Array),
        ]
        .into_iter()
        .map(|(k, kind)| (k.to_string(), AttributeSchema { kind }))
        .collect();

        Self {
            api_version: 2,
            name: name.to_string(),
            title: "XWP Country Card".to_string(),
            description: "Block rendering a card with country information.".to_string(),
            category: "widgets".to_string(),
            icon: "globe".to_string(),
            text_domain: TEXT_DOMAIN.to_string(),
            attributes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockType {
    pub metadata: BlockMetadata,
    pub edit: EditFn,
    pub save: SaveFn,
}

impl BlockType {
    pub fn country_card() -> Self {
        Self::country_card_named(BLOCK_NAME)
    }

    pub fn country_card_named(name: &str) -> Self {
        Self {
            metadata: BlockMetadata::country_card(name),
            edit: edit_preview,
            save,
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

fn edit_preview(attrs: &BlockAttributes, is_fetching: bool) -> String {
    format!(
        r#"<div class="{BLOCK_CLASS}">{}</div>"#,
        render_card(attrs, is_fetching, &English)
    )
}

#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    blocks: BTreeMap<String, BlockType>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, block: BlockType) -> Result<()> {
        let name = block.name().to_string();
        if self.blocks.contains_key(&name) {
            return Err(CardError::AlreadyRegistered(name));
        }
        info!("registered block type {name}");
        self.blocks.insert(name, block);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&BlockType> {
        self.blocks.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

static REGISTRY: OnceCell<BlockRegistry> = OnceCell::new();

/// Publish `registry` process-wide. Succeeds once.
pub fn install(registry: BlockRegistry) -> Result<&'static BlockRegistry> {
    REGISTRY
        .try_insert(registry)
        .map_err(|_| CardError::AlreadyRegistered("global block registry".into()))
}

pub fn global() -> Option<&'static BlockRegistry> {
    REGISTRY.get()
}

/// Stored form of a block: opening comment with JSON attributes, saved HTML,
/// closing comment.
pub fn serialize_block(name: &str, attrs: &BlockAttributes, save: SaveFn) -> Result<String> {
    let html = save(attrs);
    let opening = if attrs.is_empty() {
        format!("<!-- wp:{name} -->")
    } else {
        format!("<!-- wp:{name} {} -->", comment_safe_json(attrs)?)
    };
    Ok(format!("{opening}\n{html}\n<!-- /wp:{name} -->"))
}

/// Read the attributes of block `name` back from stored markup.
pub fn parse_block(name: &str, markup: &str) -> Result<BlockAttributes> {
    let marker = format!("<!-- wp:{name}");
    // `wp:xwp/country-cards` also starts with the marker; skip such blocks.
    let rest = markup
        .match_indices(&marker)
        .map(|(start, _)| &markup[start + marker.len()..])
        .find(|rest| rest.starts_with(char::is_whitespace))
        .ok_or_else(|| CardError::InvalidMarkup(format!("no opening comment for {name}")))?;
    let end = rest
        .find("-->")
        .ok_or_else(|| CardError::InvalidMarkup("unterminated block comment".into()))?;
    let json = rest[..end].trim().trim_end_matches('/').trim_end();
    if json.is_empty() {
        return Ok(BlockAttributes::default());
    }
    Ok(serde_json::from_str(json)?)
}

/// JSON that cannot close or confuse an HTML comment.
fn comment_safe_json(attrs: &BlockAttributes) -> Result<String> {
    Ok(serde_json::to_string(attrs)?
        .replace("--", "\\u002d\\u002d")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::CountryCode;
    use crate::model::{PostId, RelatedPost};

    #[test]
    fn metadata_matches_block_json_shape() {
        let json = serde_json::to_value(BlockMetadata::country_card(BLOCK_NAME)).unwrap();
        assert_eq!(json["name"], "xwp/country-card");
        assert_eq!(json["apiVersion"], 2);
        assert_eq!(json["attributes"]["countryCode"]["type"], "string");
        assert_eq!(json["attributes"]["relatedPosts"]["type"], "array");
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = BlockRegistry::new();
        registry.register(BlockType::country_card()).unwrap();
        assert!(matches!(
            registry.register(BlockType::country_card()),
            Err(CardError::AlreadyRegistered(_))
        ));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec![BLOCK_NAME]);
    }

    #[test]
    fn registered_callbacks_render() {
        let mut registry = BlockRegistry::new();
        registry.register(BlockType::country_card()).unwrap();
        let block = registry.get(BLOCK_NAME).unwrap();
        let attrs = BlockAttributes::for_country(CountryCode::parse("KE").unwrap());
        assert!((block.edit)(&attrs, true).contains("Loading Posts…"));
        assert!((block.save)(&attrs).contains("Kenya"));
    }

    #[test]
    fn empty_block_serializes_without_json() {
        let markup = serialize_block(BLOCK_NAME, &BlockAttributes::default(), save).unwrap();
        assert!(markup.starts_with("<!-- wp:xwp/country-card -->\n"));
        assert!(markup.ends_with("\n<!-- /wp:xwp/country-card -->"));
        assert_eq!(parse_block(BLOCK_NAME, &markup).unwrap(), BlockAttributes::default());
    }

    #[test]
    fn attributes_survive_the_comment() {
        let attrs = BlockAttributes {
            country_code: Some(CountryCode::parse("PT").unwrap()),
            related_posts: vec![RelatedPost {
                id: PostId::Number(11),
                title: "Lisbon -- <b>tiles</b> & trams".into(),
                excerpt: "<p>Azulejos</p>".into(),
                link: "https://example.test/?p=11".into(),
            }],
        };
        let markup = serialize_block(BLOCK_NAME, &attrs, save).unwrap();
        let opening = markup.lines().next().unwrap();
        assert!(!opening[4..opening.len() - 3].contains("--"));
        assert!(!opening.contains("<b>"));
        assert_eq!(parse_block(BLOCK_NAME, &markup).unwrap(), attrs);
    }

    #[test]
    fn parse_rejects_other_blocks() {
        assert!(parse_block(BLOCK_NAME, "<!-- wp:xwp/country-cards -->").is_err());
        assert!(parse_block(BLOCK_NAME, "<p>no block</p>").is_err());
    }

    #[test]
    fn parse_skips_blocks_sharing_the_name_prefix() {
        let markup = concat!(
            "<!-- wp:xwp/country-cards {\"layout\":\"grid\"} /-->\n",
            "<!-- wp:xwp/country-card {\"countryCode\":\"IS\"} -->\n",
            "<div></div>\n",
            "<!-- /wp:xwp/country-card -->",
        );
        let attrs = parse_block(BLOCK_NAME, markup).unwrap();
        assert_eq!(attrs.country_code.unwrap().as_str(), "IS");
    }

    #[test]
    fn stored_unknown_country_still_renders() {
        let markup = "<!-- wp:xwp/country-card {\"countryCode\":\"ZZ\"} -->\n<div></div>\n<!-- /wp:xwp/country-card -->";
        let attrs = parse_block(BLOCK_NAME, markup).unwrap();
        assert_eq!(attrs, BlockAttributes::default());
        let saved = serialize_block(BLOCK_NAME, &attrs, save).unwrap();
        assert!(saved.starts_with("<!-- wp:xwp/country-card -->"));
    }
}
