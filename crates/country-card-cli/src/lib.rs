//! country-card-cli
//! ================
//!
//! Command-line interface for the `country-card-core` block.
//!
//! This crate primarily provides a binary (`country-card`). The library target
//! only exists so the crate documentation renders this overview.
//!
//! Basic usage:
//!
//! ```text
//! country-card --help
//! country-card countries --filter isl
//! country-card country ch
//! country-card edit CH --posts posts.json --post-id 42
//! country-card check --plugin-dir . --runtime-version 8.2 --host-version 6.4
//! ```
//!
//! For programmatic access use [`country-card-core`] directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
