use country_card_core::prelude::*;
use country_card_core::i18n::English;
use country_card_core::reconcile::Ticket;
use country_card_core::render::render_card;
use country_card_core::source::{PostQuery, PostRecord, Rendered, Resolution};
use country_card_core::{activate, FailureCode, PluginConfig};
use country_card_core::requirements::StaticEnvironment;
use std::cell::RefCell;

/// Post source that records every query and answers from a canned list.
struct RecordingSource {
    queries: RefCell<Vec<PostQuery>>,
    answer: Resolution<Vec<PostRecord>>,
}

impl RecordingSource {
    fn answering(records: Vec<PostRecord>) -> Self {
        Self {
            queries: RefCell::new(Vec::new()),
            answer: Resolution::Resolved(records),
        }
    }

    fn resolving() -> Self {
        Self {
            queries: RefCell::new(Vec::new()),
            answer: Resolution::Resolving,
        }
    }
}

impl PostSource for RecordingSource {
    fn entity_records(&self, query: &PostQuery) -> Result<Resolution<Vec<PostRecord>>> {
        self.queries.borrow_mut().push(query.clone());
        Ok(self.answer.clone())
    }
}

fn record(id: u64, title: &str) -> PostRecord {
    PostRecord {
        id: PostId::Number(id),
        title: Some(Rendered::from(title)),
        excerpt: Some(Rendered::from("<p>…</p>")),
        content: None,
        link: Some(format!("https://example.test/?p={id}")),
        date: None,
        status: Some("publish".into()),
    }
}

const CURRENT_POST: u64 = 42;

#[test]
fn fresh_block_renders_selector_and_no_card() {
    let editor = Editor::new(BlockAttributes::default(), Some(PostId::Number(CURRENT_POST)));
    let html = editor.render();
    assert_eq!(editor.mode(), Mode::Picking);
    assert!(html.contains("components-combobox-control"));
    assert!(!html.contains("xwp-country-card__heading"));
}

#[test]
fn selecting_switzerland_issues_one_search() {
    let mut editor = Editor::new(BlockAttributes::default(), Some(PostId::Number(CURRENT_POST)));
    let request = editor.select_country("CH").unwrap().expect("search issued");

    assert_eq!(editor.mode(), Mode::Showing);
    assert_eq!(editor.attributes().country_code.unwrap().as_str(), "CH");
    assert!(editor.attributes().related_posts.is_empty());
    assert_eq!(request.query, PostQuery::related_to("Switzerland"));
    assert!(editor.is_fetching());
    assert!(editor.render().contains("Loading Posts…"));

    // Re-rendering while the query is out must not issue another one.
    assert!(editor.refresh().is_none());
}

#[test]
fn resolution_excludes_current_document_and_persists() {
    let mut editor = Editor::new(BlockAttributes::default(), Some(PostId::Number(CURRENT_POST)));
    let request = editor.select_country("CH").unwrap().unwrap();

    let persisted = editor.receive(
        request.ticket,
        Ok(vec![record(7, "Alps"), record(CURRENT_POST, "This very post")]),
    );

    assert!(persisted);
    assert!(!editor.is_fetching());
    let posts = &editor.attributes().related_posts;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, PostId::Number(7));
    assert!(editor.render().contains("There is 1 related post:"));
}

#[test]
fn reopened_block_reuses_persisted_posts_without_querying() {
    let mut first = Editor::new(BlockAttributes::default(), Some(PostId::Number(CURRENT_POST)));
    first.select_country("JP").unwrap();
    assert!(first.drive(&RecordingSource::answering(vec![record(1, "Kyoto")])));
    let saved = first.into_attributes();

    let source = RecordingSource::answering(vec![record(2, "Osaka")]);
    let mut reopened = Editor::new(saved.clone(), Some(PostId::Number(CURRENT_POST)));
    assert!(!reopened.drive(&source));
    assert!(source.queries.borrow().is_empty());
    assert_eq!(reopened.attributes(), &saved);
}

#[test]
fn still_resolving_source_keeps_fetching() {
    let mut editor = Editor::new(BlockAttributes::default(), None);
    editor.select_country("AR").unwrap();
    let source = RecordingSource::resolving();
    assert!(!editor.drive(&source));
    assert!(!editor.drive(&source));
    assert!(editor.is_fetching());
    // Both polls asked about the same single request.
    assert_eq!(source.queries.borrow().len(), 2);
    assert!(editor.refresh().is_none());
}

#[test]
fn late_answer_for_previous_country_is_dropped() {
    let mut editor = Editor::new(BlockAttributes::default(), None);
    let swiss = editor.select_country("CH").unwrap().unwrap();
    editor.toggle_change_country();
    let german = editor.select_country("DE").unwrap().unwrap();

    assert!(!editor.receive(swiss.ticket, Ok(vec![record(1, "Zurich")])));
    assert!(editor.attributes().related_posts.is_empty());
    assert!(editor.is_fetching());

    assert!(editor.receive(german.ticket, Ok(vec![record(2, "Berlin")])));
    assert_eq!(editor.attributes().related_posts[0].title, "Berlin");
}

#[test]
fn unknown_ticket_is_ignored() {
    let mut editor = Editor::new(BlockAttributes::default(), None);
    editor.select_country("FR").unwrap();
    assert!(!editor.receive(Ticket(999), Ok(vec![record(1, "Paris")])));
    assert!(editor.is_fetching());
}

#[test]
fn saved_markup_round_trips_and_matches_preview() {
    let mut editor = Editor::new(BlockAttributes::default(), None);
    editor.select_country("CH").unwrap();
    editor.drive(&RecordingSource::answering(vec![record(3, "Bern")]));

    let attrs = editor.attributes().clone();
    let markup = serialize_block(BLOCK_NAME, &attrs, save).unwrap();
    assert_eq!(parse_block(BLOCK_NAME, &markup).unwrap(), attrs);
    assert!(markup.contains(&save(&attrs)));
    assert!(editor.render().contains(&render_card(&attrs, false, &English)));
}

#[test]
fn missing_build_artifact_skips_registration() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = BlockRegistry::new();

    let activation = activate(
        &PluginConfig::default(),
        dir.path(),
        &StaticEnvironment::new("8.3", "6.5"),
        &mut registry,
    );

    assert!(!activation.is_active());
    assert!(registry.is_empty());
    let report = activation.report().unwrap();
    assert_eq!(report.codes(), vec![FailureCode::RequiredFiles]);
    assert_eq!(report.failures()[0].code.as_str(), "failed_check_required_files");
    let notice = activation.admin_notices().unwrap();
    assert_eq!(notice.matches("<li>").count(), 1);
}
