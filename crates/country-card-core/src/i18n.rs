// crates/country-card-core/src/i18n.rs

//! User-visible strings. The host owns translation; the card only asks.

use crate::countries::Continent;

/// Text domain the host's translation catalog is keyed by.
pub const TEXT_DOMAIN: &str = "xwp-country-card";

/// Fixed strings of the card and its admin notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    HelloFrom,
    NoRelatedPosts,
    LoadingPosts,
    PlaceholderLabel,
    PlaceholderInstructions,
    CountryFieldLabel,
    ChangeCountry,
    NoticeTitle,
}

/// String lookup. Every method has an English default, so an implementor only
/// overrides what its catalog covers.
pub trait Translator {
    fn text(&self, msg: Msg) -> String {
        english(msg).to_string()
    }

    /// "There is 1 related post:" / "There are N related posts:".
    fn related_posts_count(&self, count: usize) -> String {
        if count == 1 {
            format!("There is {count} related post:")
        } else {
            format!("There are {count} related posts:")
        }
    }

    fn continent(&self, continent: Continent) -> String {
        continent.name().to_string()
    }

    fn requires_runtime(&self, version: &str) -> String {
        format!("Country Card requires runtime {version} or higher.")
    }

    fn requires_host(&self, version: &str) -> String {
        format!("Country Card requires host platform {version} or higher.")
    }

    /// May contain `<code>` markup around `command`.
    fn incomplete_install(&self, command: &str) -> String {
        format!(
            "You appear to be running an incomplete version of the plugin. Please run <code>{command}</code> to finish installation."
        )
    }
}

/// The built-in catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Translator for English {}

fn english(msg: Msg) -> &'static str {
    match msg {
        Msg::HelloFrom => "Hello from",
        Msg::NoRelatedPosts => "There are no related posts.",
        Msg::LoadingPosts => "Loading Posts…",
        Msg::PlaceholderLabel => "XWP Country Card",
        Msg::PlaceholderInstructions => {
            "Type in a name of a country you want to display on your site."
        }
        Msg::CountryFieldLabel => "Country",
        Msg::ChangeCountry => "Change Country",
        Msg::NoticeTitle => "Country Card plugin could not be initialized.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_forms() {
        assert_eq!(English.related_posts_count(1), "There is 1 related post:");
        assert_eq!(English.related_posts_count(3), "There are 3 related posts:");
    }

    struct Shouty;
    impl Translator for Shouty {
        fn text(&self, msg: Msg) -> String {
            english(msg).to_uppercase()
        }
    }

    #[test]
    fn overrides_are_partial() {
        assert_eq!(Shouty.text(Msg::HelloFrom), "HELLO FROM");
        assert_eq!(Shouty.continent(Continent::Asia), "Asia");
    }
}
