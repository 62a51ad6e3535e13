//! Editing session example for country-card-rs
//!
//! This example walks one block through the editor:
//! - Insert a fresh block and look at the selector
//! - Pick a country and answer the related-posts query
//! - Save the block, reopen it, and check nothing is queried again

use country_card_rs::prelude::*;
use country_card_rs::source::{PostRecord, Rendered};

fn post(id: u64, title: &str, body: &str, date: &str) -> PostRecord {
    PostRecord {
        id: PostId::Number(id),
        title: Some(Rendered::from(title)),
        excerpt: Some(Rendered::from(format!("<p>{body}</p>").as_str())),
        content: Some(Rendered::from(body)),
        link: Some(format!("https://example.test/?p={id}")),
        date: Some(date.to_string()),
        status: Some("publish".to_string()),
    }
}

fn main() -> Result<()> {
    println!("=== Country Card Editing Session ===\n");

    let source = MemoryPostSource::new(vec![
        post(1, "Hiking the Alps", "Three weeks across Switzerland.", "2024-05-01T09:00:00"),
        post(2, "Fondue night", "A recipe from Switzerland.", "2024-06-12T18:30:00"),
        post(3, "Lisbon trams", "Riding line 28 in Portugal.", "2024-07-03T10:15:00"),
        post(42, "This post", "Our trip to Switzerland.", "2024-08-20T08:00:00"),
    ]);

    // Step 1: a fresh block starts in the selector
    println!("--- Step 1: Insert the block ---");
    let mut editor = Editor::new(BlockAttributes::default(), Some(PostId::Number(42)));
    println!("Mode: {:?}", editor.mode());
    println!("Can change country: {}\n", editor.can_change_country());

    // Step 2: pick Switzerland; the query searches for the country name
    println!("--- Step 2: Select CH ---");
    if let Some(request) = editor.select_country("CH")? {
        println!(
            "Query #{} searches for {:?} (per_page = {})",
            request.ticket.0, request.query.search, request.query.per_page
        );
    }
    println!("Fetching: {}\n", editor.is_fetching());

    // Step 3: answer the query from the in-memory posts
    println!("--- Step 3: Resolve related posts ---");
    let persisted = editor.drive(&source);
    println!("Persisted: {persisted}");
    for p in &editor.attributes().related_posts {
        println!("- {} <{}>", p.title, p.link);
    }
    println!();

    // Step 4: save and reopen
    println!("--- Step 4: Save and reopen ---");
    let markup = serialize_block(BLOCK_NAME, editor.attributes(), save)?;
    println!("{markup}\n");

    let reopened = parse_block(BLOCK_NAME, &markup)?;
    let mut editor = Editor::new(reopened, Some(PostId::Number(42)));
    println!("Query on reopen: {:?}", editor.refresh().map(|r| r.ticket));
    println!("Mode: {:?}", editor.mode());
    println!("Related posts kept: {}", editor.attributes().related_posts.len());

    Ok(())
}
