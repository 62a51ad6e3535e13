//! country-card-wasm: WebAssembly bindings for country-card-core
//!
//! The block editor's JS glue calls into this crate: the country table and
//! flags for the selector, the card renderer for the preview and the saved
//! markup, and a [`CountryCardEditor`] class that drives one block instance.
//!
//! Quick start (block editor glue)
//! -------------------------------
//! ```javascript
//! import init, { CountryCardEditor, save_block } from 'country-card-wasm';
//!
//! await init();
//! const editor = new CountryCardEditor(attributes, currentPostId);
//! const request = editor.select_country('CH');
//! if (request) {
//!   const posts = await apiFetch({ path: addQueryArgs('/wp/v2/posts', request.query) });
//!   editor.resolve(request.ticket, posts);
//! }
//! setAttributes(editor.attributes());
//! element.innerHTML = editor.render();
//! ```
//!
//! Notes
//! -----
//! - Queries are not sent from Rust. `select_country`/`refresh` hand back
//!   `{ ticket, country, query }`; the glue sends it and passes the answer to
//!   `resolve` (or calls `fail` on error). Answers with an old ticket are
//!   ignored.
//! - Attributes cross the boundary as plain objects with camelCase keys.
use country_card_core::render::save;
use country_card_core::{
    emoji_flag, filter_options, lookup_country, parse_block, BlockAttributes, CardError, Editor,
    Mode, PostId, PostQuery, PostRecord, SearchRequest, Ticket, BLOCK_NAME,
};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(
        &format!(
            "country card ready: {} countries",
            country_card_core::countries().count()
        )
        .into(),
    );
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/* --------------------------------------------------------------------------
   Country table
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn get_country_count() -> usize {
    country_card_core::countries().count()
}

#[wasm_bindgen]
pub fn get_country_name(code: &str) -> Option<String> {
    lookup_country(code).map(|c| c.name.to_string())
}

#[wasm_bindgen]
pub fn get_continent_name(code: &str) -> Option<String> {
    lookup_country(code).map(|c| c.continent.name().to_string())
}

#[wasm_bindgen]
pub fn get_emoji_flag(code: &str) -> String {
    emoji_flag(code)
}

/// Selector options `{ value, label }` matching `query` (all when empty).
#[wasm_bindgen]
pub fn country_options(query: &str) -> Result<JsValue, JsValue> {
    let array = js_sys::Array::new();
    for option in filter_options(query) {
        array.push(&to_value(&option).map_err(js_err)?);
    }
    Ok(array.into())
}

/* --------------------------------------------------------------------------
   Rendering
-------------------------------------------------------------------------- */

/// Card markup for the given attributes object.
#[wasm_bindgen]
pub fn render_card(attributes: JsValue, is_fetching: bool) -> Result<String, JsValue> {
    let attrs: BlockAttributes = from_value(attributes).map_err(js_err)?;
    Ok(country_card_core::render::render_card(
        &attrs,
        is_fetching,
        &country_card_core::i18n::English,
    ))
}

/// Saved markup, as stored in the document.
#[wasm_bindgen]
pub fn save_block(attributes: JsValue) -> Result<String, JsValue> {
    let attrs: BlockAttributes = from_value(attributes).map_err(js_err)?;
    Ok(save(&attrs))
}

/// Attributes from stored block markup.
#[wasm_bindgen]
pub fn parse_saved_block(markup: &str) -> Result<JsValue, JsValue> {
    let attrs = parse_block(BLOCK_NAME, markup).map_err(js_err)?;
    to_value(&attrs).map_err(js_err)
}

/* --------------------------------------------------------------------------
   Editor
-------------------------------------------------------------------------- */

#[derive(Serialize)]
struct RequestView<'a> {
    ticket: u64,
    country: &'a str,
    query: &'a PostQuery,
}

fn request_to_js(request: Option<SearchRequest>) -> Result<JsValue, JsValue> {
    match request {
        None => Ok(JsValue::NULL),
        Some(req) => to_value(&RequestView {
            ticket: req.ticket.0,
            country: req.country.as_str(),
            query: &req.query,
        })
        .map_err(js_err),
    }
}

/// One block instance in the editor.
#[wasm_bindgen]
pub struct CountryCardEditor {
    inner: Editor,
}

#[wasm_bindgen]
impl CountryCardEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(attributes: JsValue, current_post_id: Option<u32>) -> Result<CountryCardEditor, JsValue> {
        let attrs: BlockAttributes = if attributes.is_undefined() || attributes.is_null() {
            BlockAttributes::default()
        } else {
            from_value(attributes).map_err(js_err)?
        };
        let post = current_post_id.map(|id| PostId::Number(u64::from(id)));
        Ok(Self {
            inner: Editor::new(attrs, post),
        })
    }

    /// `"picking"` or `"showing"`.
    pub fn mode(&self) -> String {
        match self.inner.mode() {
            Mode::Picking => "picking".to_string(),
            Mode::Showing => "showing".to_string(),
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.inner.is_fetching()
    }

    pub fn can_change_country(&self) -> bool {
        self.inner.can_change_country()
    }

    pub fn attributes(&self) -> Result<JsValue, JsValue> {
        to_value(self.inner.attributes()).map_err(js_err)
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_value(&self.inner.view()).map_err(js_err)
    }

    /// Returns the request to send, or `null` when nothing changed.
    pub fn select_country(&mut self, code: &str) -> Result<JsValue, JsValue> {
        let request = self.inner.select_country(code).map_err(js_err)?;
        request_to_js(request)
    }

    pub fn toggle_change_country(&mut self) -> String {
        self.inner.toggle_change_country();
        self.mode()
    }

    pub fn refresh(&mut self) -> Result<JsValue, JsValue> {
        request_to_js(self.inner.refresh())
    }

    /// Deliver the posts answering request `ticket`. Returns `true` when
    /// the attributes changed and should be written back.
    ///
    /// Posts that cannot be decoded count as a failed search.
    pub fn resolve(&mut self, ticket: u64, posts: JsValue) -> bool {
        let outcome = from_value::<Vec<PostRecord>>(posts)
            .map_err(|e| CardError::Search(format!("undecodable posts: {e}")));
        self.inner.receive(Ticket(ticket), outcome)
    }

    /// Report that request `ticket` failed.
    pub fn fail(&mut self, ticket: u64, message: &str) -> bool {
        web_sys::console::warn_1(&format!("related posts request failed: {message}").into());
        self.inner
            .receive(Ticket(ticket), Err(CardError::Search(message.to_string())))
    }

    pub fn render(&self) -> String {
        self.inner.render()
    }
}
