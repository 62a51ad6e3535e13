//! Workspace crate. Re-exports [`country_card_core`] so the demos can use
//! `country_card_rs::prelude::*`.
pub use country_card_core::*;
