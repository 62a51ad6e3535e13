// crates/country-card-core/src/editor.rs

//! # Editing Controller
//!
//! One [`Editor`] per block instance in the editing surface. It owns the
//! block's attributes for the session, switches between the country selector
//! ([`Mode::Picking`]) and the card ([`Mode::Showing`]), and writes related
//! posts back into the attributes when a query for the selected country comes
//! back non-empty.

use crate::countries::{country_options, CountryCode};
use crate::error::Result;
use crate::html::escape;
use crate::i18n::{English, Msg, Translator};
use crate::model::{BlockAttributes, PostId};
use crate::reconcile::{Reconciler, SearchRequest, Ticket};
use crate::render::render_card;
use crate::source::{PostRecord, PostSource, Resolution};
use log::{debug, info};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Selector visible.
    Picking,
    /// Card visible.
    Showing,
}

/// Snapshot of the editor for hosts that re-render from data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub mode: Mode,
    pub is_fetching: bool,
    pub can_change_country: bool,
    pub attributes: BlockAttributes,
}

#[derive(Debug, Clone)]
pub struct Editor {
    attributes: BlockAttributes,
    mode: Mode,
    reconciler: Reconciler,
}

impl Editor {
    /// Open a block for editing. `current_post` is the document being edited
    /// and is never listed among its own related posts.
    pub fn new(attributes: BlockAttributes, current_post: Option<PostId>) -> Self {
        let mode = if attributes.country_code.is_some() {
            Mode::Showing
        } else {
            Mode::Picking
        };
        let reconciler = Reconciler::new(current_post, attributes.country_code);
        Self {
            attributes,
            mode,
            reconciler,
        }
    }

    pub fn with_max_related_posts(mut self, max: usize) -> Self {
        self.reconciler = self.reconciler.with_max_posts(max);
        self
    }

    pub fn attributes(&self) -> &BlockAttributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> BlockAttributes {
        self.attributes
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_fetching(&self) -> bool {
        self.reconciler.is_fetching()
    }

    /// The "Change Country" toggle is disabled until a country is set.
    pub fn can_change_country(&self) -> bool {
        self.attributes.country_code.is_some()
    }

    pub fn view(&self) -> EditorView {
        EditorView {
            mode: self.mode,
            is_fetching: self.is_fetching(),
            can_change_country: self.can_change_country(),
            attributes: self.attributes.clone(),
        }
    }

    /// Pick a country from the selector.
    ///
    /// Empty input and the already selected country are no-ops (`Ok(None)`).
    /// A new country replaces the old one, clears the related posts, hides the
    /// selector and returns the query to send. Unknown codes are rejected
    /// without touching state.
    pub fn select_country(&mut self, code: &str) -> Result<Option<SearchRequest>> {
        if code.trim().is_empty() {
            return Ok(None);
        }
        let code = CountryCode::parse(code)?;
        if self.attributes.country_code == Some(code) {
            return Ok(None);
        }

        info!("country card: selected {} ({})", code, code.name());
        self.attributes = BlockAttributes::for_country(code);
        self.reconciler.reset();
        self.mode = Mode::Showing;
        Ok(self.refresh())
    }

    /// Show or hide the selector. Does nothing while no country is set.
    pub fn toggle_change_country(&mut self) -> Mode {
        if self.can_change_country() {
            self.mode = match self.mode {
                Mode::Picking => Mode::Showing,
                Mode::Showing => Mode::Picking,
            };
        }
        self.mode
    }

    /// Run the reconciler against the current attributes. Returns a query only
    /// when a new one must be sent.
    pub fn refresh(&mut self) -> Option<SearchRequest> {
        self.reconciler.reconcile(&self.attributes).request
    }

    /// Deliver the host's answer to query `ticket`.
    ///
    /// Returns `true` when related posts were persisted into the attributes.
    /// Stale answers and empty results leave the attributes alone.
    pub fn receive(&mut self, ticket: Ticket, outcome: Result<Vec<PostRecord>>) -> bool {
        let Some(resolved) = self.reconciler.resolve(ticket, outcome) else {
            return false;
        };
        if self.attributes.country_code != Some(resolved.country) {
            debug!(
                "dropping related posts for {}: selection moved on",
                resolved.country
            );
            return false;
        }
        if resolved.posts.is_empty() {
            return false;
        }
        info!(
            "country card: persisting {} related post(s) for {}",
            resolved.posts.len(),
            resolved.country
        );
        self.attributes.related_posts = resolved.posts;
        true
    }

    /// Send any outstanding query to `source` and apply the answer.
    ///
    /// For synchronous hosts. Returns `true` when posts were persisted; a
    /// source that is still resolving leaves the editor fetching.
    pub fn drive<S: PostSource + ?Sized>(&mut self, source: &S) -> bool {
        self.refresh();
        let Some(request) = self.reconciler.pending().cloned() else {
            return false;
        };
        match source.entity_records(&request.query) {
            Ok(Resolution::Resolving) => false,
            Ok(Resolution::Resolved(records)) => self.receive(request.ticket, Ok(records)),
            Err(e) => self.receive(request.ticket, Err(e)),
        }
    }

    pub fn render(&self) -> String {
        self.render_with(&English)
    }

    /// Editing markup: toolbar plus either the selector or the card.
    pub fn render_with(&self, tr: &dyn Translator) -> String {
        let mut out = String::from(r#"<div class="wp-block-xwp-country-card">"#);
        out.push_str(&self.toolbar(tr));
        match self.mode {
            Mode::Picking => out.push_str(&self.selector(tr)),
            Mode::Showing => {
                out.push_str(&render_card(&self.attributes, self.is_fetching(), tr))
            }
        }
        out.push_str("</div>");
        out
    }

    fn toolbar(&self, tr: &dyn Translator) -> String {
        format!(
            r#"<div class="block-editor-block-toolbar"><button type="button" class="components-toolbar-button" aria-label="{}"{}></button></div>"#,
            escape(&tr.text(Msg::ChangeCountry)),
            if self.can_change_country() { "" } else { " disabled" }
        )
    }

    fn selector(&self, tr: &dyn Translator) -> String {
        let selected = self.attributes.country_code;
        let mut out = format!(
            r#"<div class="components-placeholder is-column-layout"><div class="components-placeholder__label">{}</div><div class="components-placeholder__instructions">{}</div><select class="components-combobox-control" aria-label="{}"><option value=""></option>"#,
            escape(&tr.text(Msg::PlaceholderLabel)),
            escape(&tr.text(Msg::PlaceholderInstructions)),
            escape(&tr.text(Msg::CountryFieldLabel)),
        );
        for option in country_options() {
            out.push_str(&format!(
                r#"<option value="{}"{}>{}</option>"#,
                option.value,
                if selected == Some(option.value) { " selected" } else { "" },
                escape(&option.label)
            ));
        }
        out.push_str("</select></div>");
        out
    }
}
