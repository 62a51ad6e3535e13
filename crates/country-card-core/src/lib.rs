// crates/country-card-core/src/lib.rs

//! # country-card-core
//!
//! Core of the country card block: pick a country, show its flag, name and
//! continent, and list a handful of posts that mention it.
//!
//! ```rust
//! use country_card_core::{BlockAttributes, Editor, MemoryPostSource, Mode};
//!
//! let mut editor = Editor::new(BlockAttributes::default(), None);
//! assert_eq!(editor.mode(), Mode::Picking);
//!
//! let request = editor.select_country("CH").unwrap().unwrap();
//! assert_eq!(request.query.search, "Switzerland");
//!
//! editor.drive(&MemoryPostSource::default());
//! assert!(!editor.is_fetching());
//! assert!(editor.render().contains("There are no related posts."));
//! ```

pub mod block;
pub mod config;
pub mod countries;
pub mod editor;
pub mod error;
pub mod flag;
pub mod html;
pub mod i18n;
pub mod model;
pub mod notice;
pub mod plugin;
pub mod reconcile;
pub mod render;
pub mod requirements;
pub mod source;
pub mod text;

// Re-exports
pub use crate::block::{parse_block, serialize_block, BlockRegistry, BlockType, BLOCK_NAME};
pub use crate::config::PluginConfig;
pub use crate::countries::{
    continent_name, countries, country_options, filter_options, lookup_country, Continent,
    CountryCode, CountryOption, CountryRecord,
};
pub use crate::editor::{Editor, EditorView, Mode};
pub use crate::error::{CardError, Result};
pub use crate::flag::emoji_flag;
pub use crate::model::{BlockAttributes, PostId, RelatedPost};
pub use crate::plugin::{activate, activate_global, Activation};
pub use crate::reconcile::{Reconciled, Reconciler, SearchRequest, Ticket};
pub use crate::requirements::{CheckReport, Environment, FailureCode, Requirements};
pub use crate::source::{MemoryPostSource, PostQuery, PostRecord, PostSource, Resolution};

/// Everything a host integration usually needs.
pub mod prelude {
    pub use crate::block::{parse_block, serialize_block, BlockRegistry, BlockType, BLOCK_NAME};
    pub use crate::countries::{lookup_country, CountryCode};
    pub use crate::editor::{Editor, Mode};
    pub use crate::error::{CardError, Result};
    pub use crate::flag::emoji_flag;
    pub use crate::model::{BlockAttributes, PostId, RelatedPost};
    pub use crate::render::save;
    pub use crate::source::{MemoryPostSource, PostSource};
}
