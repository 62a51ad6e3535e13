//! country-card: Command-line interface for country-card-core
//!
//! Inspect the country table, render and parse stored block markup, replay
//! an editing session against a posts file, and run the startup checks the
//! plugin runs before registering its block.
//!
//! Usage examples
//! --------------
//!
//! - List countries whose name contains "isl"
//!   $ country-card countries --filter isl
//!
//! - Show a country
//!   $ country-card country ch
//!
//! - Pick Switzerland in a post with id 42, searching posts.json
//!   $ country-card edit CH --posts posts.json --post-id 42
//!
//! - Startup checks (prints the admin notice on failure)
//!   $ country-card check --plugin-dir . --runtime-version 8.2 --host-version 6.4
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` or pass `-v`.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use country_card_core::prelude::*;
use country_card_core::requirements::StaticEnvironment;
use country_card_core::block::global;
use country_card_core::{activate_global, continent_name, filter_options, PluginConfig};
use log::{info, LevelFilter};
use std::fs;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_log(args.verbose);

    #[cfg(feature = "json")]
    let config = match &args.config {
        Some(path) => PluginConfig::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PluginConfig::default(),
    };
    #[cfg(not(feature = "json"))]
    let config = PluginConfig::default();

    match args.command {
        Commands::Countries { filter } => {
            for option in filter_options(filter.as_deref().unwrap_or("")) {
                let continent = option.value.continent();
                println!("{} ({})", option.label, continent);
            }
        }

        Commands::Country { code } => match lookup_country(&code) {
            Some(c) => {
                println!("Country: {}", c.name);
                println!("Code: {}", c.code);
                println!("Flag: {}", c.flag());
                println!(
                    "Continent: {} ({})",
                    continent_name(c.continent.code()).unwrap_or(""),
                    c.continent.code()
                );
            }
            None => eprintln!("No country found for: {code}"),
        },

        Commands::Flag { code } => println!("{}", emoji_flag(&code)),

        Commands::Metadata => {
            let block = BlockType::country_card_named(&config.block_name);
            println!("{}", serde_json::to_string_pretty(&block.metadata)?);
        }

        Commands::Render { attributes } => {
            let attrs = read_attributes(&attributes)?;
            println!("{}", serialize_block(&config.block_name, &attrs, save)?);
        }

        Commands::Parse { markup } => {
            let markup = fs::read_to_string(&markup)
                .with_context(|| format!("reading {}", markup.display()))?;
            let attrs = parse_block(&config.block_name, &markup)?;
            println!("{}", serde_json::to_string_pretty(&attrs)?);
        }

        Commands::Edit {
            code,
            posts,
            post_id,
            attributes,
        } => {
            let attrs = match attributes {
                Some(path) => read_attributes(&path)?,
                None => BlockAttributes::default(),
            };
            let source = match posts {
                #[cfg(feature = "json")]
                Some(path) => MemoryPostSource::load_from_path(&path)
                    .with_context(|| format!("loading posts {}", path.display()))?,
                #[cfg(not(feature = "json"))]
                Some(_) => anyhow::bail!("reading posts files needs the `json` feature"),
                None => MemoryPostSource::default(),
            };

            let mut editor = Editor::new(attrs, post_id.map(PostId::Number))
                .with_max_related_posts(config.max_related_posts);
            if editor.mode() == Mode::Showing {
                editor.toggle_change_country();
            }
            if let Some(request) = editor.select_country(&code)? {
                info!("searching posts for {:?}", request.query.search);
            }
            editor.drive(&source);

            let attrs = editor.into_attributes();
            println!("{}", serialize_block(&config.block_name, &attrs, save)?);
        }

        Commands::Check {
            plugin_dir,
            runtime_version,
            host_version,
        } => {
            let env = StaticEnvironment::new(runtime_version, host_version);
            let activation = activate_global(&config, &plugin_dir, &env);
            match activation.admin_notices() {
                Some(notice) => {
                    for failure in activation.report().map(|r| r.failures()).unwrap_or(&[]) {
                        eprintln!("{}: {}", failure.code, failure.message);
                    }
                    println!("{notice}");
                }
                None => {
                    let names: Vec<_> = global().map(|r| r.names().collect()).unwrap_or_default();
                    println!("All checks passed; registered: {}", names.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn init_log(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn read_attributes(path: &std::path::Path) -> anyhow::Result<BlockAttributes> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}
