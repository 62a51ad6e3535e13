// crates/country-card-core/src/render.rs

//! # Presentation
//!
//! Pure functions from [`BlockAttributes`] to HTML. The editor preview and the
//! saved public markup share [`render_card`], so both look the same; only the
//! editor ever passes `is_fetching = true`.

use crate::countries::CountryCode;
use crate::html::escape;
use crate::i18n::{English, Msg, Translator};
use crate::model::{BlockAttributes, RelatedPost};

/// Class the host adds to the saved wrapper of a `xwp/country-card` block.
pub const BLOCK_CLASS: &str = "wp-block-xwp-country-card";

/// Render the card, or an empty string when no country is selected.
pub fn render_card(attrs: &BlockAttributes, is_fetching: bool, tr: &dyn Translator) -> String {
    let Some(country) = attrs.country_code else {
        return String::new();
    };

    let mut out = String::from(r#"<div class="xwp-country-card">"#);
    out.push_str(&card_header(country));
    out.push_str(&card_body(country, tr));
    if is_fetching {
        out.push_str(&posts_loading(tr));
    } else {
        out.push_str(&related_posts(&attrs.related_posts, tr));
    }
    out.push_str("</div>");
    out
}

/// Saved markup: the card inside the block wrapper. Never shows a loader.
pub fn save(attrs: &BlockAttributes) -> String {
    save_with(attrs, &English)
}

pub fn save_with(attrs: &BlockAttributes, tr: &dyn Translator) -> String {
    format!(
        r#"<div class="{BLOCK_CLASS}">{}</div>"#,
        render_card(attrs, false, tr)
    )
}

fn card_header(country: CountryCode) -> String {
    let flag = country.flag();
    format!(
        r#"<div class="xwp-country-card__media" data-emoji-flag="{flag}"><div class="xwp-country-card__flag">{flag}</div></div>"#
    )
}

fn card_body(country: CountryCode, tr: &dyn Translator) -> String {
    format!(
        r#"<h3 class="xwp-country-card__heading">{} <strong>{}</strong> (<span class="xwp-country-card__country-code">{}</span>), {}!</h3>"#,
        escape(&tr.text(Msg::HelloFrom)),
        escape(country.name()),
        country.as_str(),
        escape(&tr.continent(country.continent())),
    )
}

fn posts_loading(tr: &dyn Translator) -> String {
    format!(
        r#"<div class="xwp-country-card__loader"><div class="xwp-country-card__loader-container">{}<span class="components-spinner"></span></div></div>"#,
        escape(&tr.text(Msg::LoadingPosts))
    )
}

fn related_posts(posts: &[RelatedPost], tr: &dyn Translator) -> String {
    let heading = if posts.is_empty() {
        tr.text(Msg::NoRelatedPosts)
    } else {
        tr.related_posts_count(posts.len())
    };

    let mut out = format!(
        r#"<div class="xwp-country-card-related-posts"><h3 class="xwp-country-card-related-posts__heading">{}</h3>"#,
        escape(&heading)
    );
    if !posts.is_empty() {
        out.push_str(r#"<ul class="xwp-country-card-related-posts__list">"#);
        for post in posts {
            out.push_str(&post_item(post));
        }
        out.push_str("</ul>");
    }
    out.push_str("</div>");
    out
}

fn post_item(post: &RelatedPost) -> String {
    let id = escape(&post.id.to_string());
    let mut out = format!(
        r#"<li class="xwp-country-card-related-posts__item"><a class="xwp-country-card-related-posts__link" href="{}" data-post-id="{id}">"#,
        escape(&post.link)
    );
    if !post.title.is_empty() {
        out.push_str(&format!(
            r#"<h3 class="xwp-country-card-related-posts__title">{}</h3>"#,
            escape(&post.title)
        ));
    }
    // Excerpts arrive as host-rendered HTML.
    if !post.excerpt.is_empty() {
        out.push_str(&format!(
            r#"<div class="xwp-country-card-related-posts__excerpt">{}</div>"#,
            post.excerpt
        ));
    }
    out.push_str("</a></li>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostId;

    fn attrs(code: &str, posts: Vec<RelatedPost>) -> BlockAttributes {
        BlockAttributes {
            country_code: Some(CountryCode::parse(code).unwrap()),
            related_posts: posts,
        }
    }

    fn post(id: u64, title: &str, excerpt: &str) -> RelatedPost {
        RelatedPost {
            id: PostId::Number(id),
            title: title.into(),
            excerpt: excerpt.into(),
            link: format!("https://example.test/?p={id}"),
        }
    }

    #[test]
    fn nothing_without_country() {
        assert_eq!(render_card(&BlockAttributes::default(), false, &English), "");
        assert_eq!(
            save(&BlockAttributes::default()),
            r#"<div class="wp-block-xwp-country-card"></div>"#
        );
    }

    #[test]
    fn heading_has_name_code_and_continent() {
        let html = render_card(&attrs("CH", vec![]), false, &English);
        assert!(html.contains(r#"data-emoji-flag="🇨🇭""#));
        assert!(html.contains(
            r#"Hello from <strong>Switzerland</strong> (<span class="xwp-country-card__country-code">CH</span>), Europe!"#
        ));
        assert!(html.contains("There are no related posts."));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn loader_replaces_footer_while_fetching() {
        let html = render_card(&attrs("CH", vec![post(1, "A", "")]), true, &English);
        assert!(html.contains("Loading Posts…"));
        assert!(!html.contains("related-posts__list"));
    }

    #[test]
    fn saved_markup_never_loads() {
        let html = save(&attrs("BR", vec![]));
        assert!(html.starts_with(r#"<div class="wp-block-xwp-country-card"><div class="xwp-country-card">"#));
        assert!(!html.contains("Loading"));
    }

    #[test]
    fn posts_list_escapes_title_but_not_excerpt() {
        let html = render_card(
            &attrs("FR", vec![post(3, "Crêpes & <wine>", "<p>Bon</p>"), post(4, "", "")]),
            false,
            &English,
        );
        assert!(html.contains("There are 2 related posts:"));
        assert!(html.contains("Crêpes &amp; &lt;wine&gt;"));
        assert!(html.contains("<p>Bon</p>"));
        assert!(html.contains(r#"data-post-id="4""#));
        assert_eq!(html.matches("related-posts__title").count(), 1);
    }
}
