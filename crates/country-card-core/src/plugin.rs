// crates/country-card-core/src/plugin.rs

//! Plugin bootstrap: run the startup guard, then either register the block or
//! leave an admin notice behind.

use crate::block::{install, BlockRegistry, BlockType};
use crate::config::PluginConfig;
use crate::notice::AdminNotice;
use crate::requirements::{CheckReport, Environment};
use log::{info, warn};
use std::path::Path;

/// Emoji CDN the host prefetches for its own emoji script. The card renders
/// native flag glyphs, so the hint is dropped.
pub const EMOJI_SVG_URL: &str = "https://s.w.org/images/core/emoji/2/svg/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Active,
    /// Checks failed; the block was not registered.
    Inactive {
        report: CheckReport,
        notice: AdminNotice,
    },
}

impl Activation {
    pub fn is_active(&self) -> bool {
        matches!(self, Activation::Active)
    }

    /// Output of the admin notices hook. Public pages never call this.
    pub fn admin_notices(&self) -> Option<String> {
        match self {
            Activation::Active => None,
            Activation::Inactive { notice, .. } => Some(notice.render()),
        }
    }

    pub fn report(&self) -> Option<&CheckReport> {
        match self {
            Activation::Active => None,
            Activation::Inactive { report, .. } => Some(report),
        }
    }
}

/// Check the environment and register the block if it passes.
pub fn activate(
    config: &PluginConfig,
    plugin_dir: &Path,
    env: &dyn Environment,
    registry: &mut BlockRegistry,
) -> Activation {
    let report = config.requirements(plugin_dir).run_checks(env);
    if !report.is_ok() {
        warn!(
            "country card not activated: {} startup check(s) failed",
            report.failures().len()
        );
        let notice = AdminNotice::from_report(&report);
        return Activation::Inactive { report, notice };
    }

    if let Err(e) = registry.register(BlockType::country_card_named(&config.block_name)) {
        warn!("{e}");
    }
    info!("country card active as {}", config.block_name);
    Activation::Active
}

/// Like [`activate`], but into a fresh registry that is then published as the
/// process-wide one (see [`crate::block::global`]). Once a registry is
/// installed, later calls leave it in place.
pub fn activate_global(
    config: &PluginConfig,
    plugin_dir: &Path,
    env: &dyn Environment,
) -> Activation {
    let mut registry = BlockRegistry::new();
    let activation = activate(config, plugin_dir, env, &mut registry);
    if activation.is_active() {
        if let Err(e) = install(registry) {
            warn!("{e}");
        }
    }
    activation
}

/// Drop the emoji CDN from `dns-prefetch` hints; other relations pass through.
pub fn filter_resource_hints(urls: Vec<String>, relation_type: &str) -> Vec<String> {
    if relation_type != "dns-prefetch" {
        return urls;
    }
    urls.into_iter().filter(|u| u != EMOJI_SVG_URL).collect()
}
