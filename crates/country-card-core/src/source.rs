// crates/country-card-core/src/source.rs

//! # Post Source
//!
//! The host's content search, seen from the card. A query is keyword + a few
//! fixed filters; the answer is either "still resolving" or a list of post
//! summaries. The two must stay distinguishable: an empty list means "no
//! related posts", while [`Resolution::Resolving`] means "ask again later".

use crate::error::Result;
use crate::model::{null_as_empty, PostId};
use crate::text::contains_folded;
use serde::{Deserialize, Serialize};

/// Page size the host's REST layer uses when none is given.
pub const DEFAULT_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
}

/// Query sent to the host. Field names follow the host's REST parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostQuery {
    pub search: String,
    pub orderby: OrderBy,
    pub order: Order,
    pub status: PostStatus,
    pub per_page: usize,
}

impl PostQuery {
    /// Newest published posts mentioning `term`.
    pub fn related_to(term: &str) -> Self {
        Self {
            search: term.to_string(),
            orderby: OrderBy::Date,
            order: Order::Desc,
            status: PostStatus::Publish,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// `{ "rendered": "..." }` wrapper the host uses for titles and excerpts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rendered: String,
}

impl From<&str> for Rendered {
    fn from(s: &str) -> Self {
        Rendered {
            rendered: s.to_string(),
        }
    }
}

/// A post summary as returned by the host. Every field but `id` may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,
    #[serde(default)]
    pub title: Option<Rendered>,
    #[serde(default)]
    pub excerpt: Option<Rendered>,
    #[serde(default)]
    pub content: Option<Rendered>,
    #[serde(default)]
    pub link: Option<String>,
    /// ISO-8601 publish date; sorts lexicographically.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Either the host is still working on a query, or it has an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolving,
    Resolved(T),
}

/// Host content search.
pub trait PostSource {
    fn entity_records(&self, query: &PostQuery) -> Result<Resolution<Vec<PostRecord>>>;
}

/// A post source over a fixed list of posts.
///
/// Answers synchronously: keyword match on title, excerpt and content
/// (accent- and case-insensitive), status filter, newest first, one page.
#[derive(Debug, Clone, Default)]
pub struct MemoryPostSource {
    posts: Vec<PostRecord>,
}

impl MemoryPostSource {
    pub fn new(posts: Vec<PostRecord>) -> Self {
        Self { posts }
    }

    /// Load a JSON array of post records.
    #[cfg(feature = "json")]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let posts: Vec<PostRecord> = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(Self::new(posts))
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }
}

impl PostSource for MemoryPostSource {
    fn entity_records(&self, query: &PostQuery) -> Result<Resolution<Vec<PostRecord>>> {
        let wanted_status = match query.status {
            PostStatus::Publish => "publish",
        };
        let text = |r: &Option<Rendered>| r.as_ref().map(|r| r.rendered.clone()).unwrap_or_default();

        let mut hits: Vec<PostRecord> = self
            .posts
            .iter()
            .filter(|p| p.status.as_deref().unwrap_or("publish") == wanted_status)
            .filter(|p| {
                contains_folded(&text(&p.title), &query.search)
                    || contains_folded(&text(&p.excerpt), &query.search)
                    || contains_folded(&text(&p.content), &query.search)
            })
            .cloned()
            .collect();

        hits.sort_by(|a, b| match query.order {
            Order::Asc => a.date.cmp(&b.date),
            Order::Desc => b.date.cmp(&a.date),
        });
        hits.truncate(query.per_page);

        Ok(Resolution::Resolved(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, title: &str, date: &str, status: &str) -> PostRecord {
        PostRecord {
            id: PostId::Number(id),
            title: Some(title.into()),
            excerpt: None,
            content: None,
            link: Some(format!("https://example.test/?p={id}")),
            date: Some(date.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[test]
    fn query_defaults_match_host_parameters() {
        let q = PostQuery::related_to("Switzerland");
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["search"], "Switzerland");
        assert_eq!(json["orderby"], "date");
        assert_eq!(json["order"], "desc");
        assert_eq!(json["status"], "publish");
        assert_eq!(json["per_page"], 10);
    }

    #[test]
    fn memory_source_filters_and_orders_newest_first() {
        let source = MemoryPostSource::new(vec![
            post(1, "Hiking in Switzerland", "2021-01-01T10:00:00", "publish"),
            post(2, "Swiss cheese", "2021-03-01T10:00:00", "publish"),
            post(3, "Switzerland by train", "2021-02-01T10:00:00", "publish"),
            post(4, "Switzerland draft", "2021-04-01T10:00:00", "draft"),
        ]);
        let Resolution::Resolved(hits) = source
            .entity_records(&PostQuery::related_to("switzerland"))
            .unwrap()
        else {
            panic!("memory source never resolves lazily");
        };
        let ids: Vec<_> = hits.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![PostId::Number(3), PostId::Number(1)]);
    }

    #[test]
    fn memory_source_caps_at_per_page() {
        let posts = (0..15)
            .map(|i| post(i, "France", &format!("2021-01-{:02}", i + 1), "publish"))
            .collect();
        let source = MemoryPostSource::new(posts);
        let Resolution::Resolved(hits) = source
            .entity_records(&PostQuery::related_to("France"))
            .unwrap()
        else {
            panic!("memory source never resolves lazily");
        };
        assert_eq!(hits.len(), DEFAULT_PER_PAGE);
        assert_eq!(hits[0].id, PostId::Number(14));
    }

    #[test]
    fn host_records_tolerate_null_fields() {
        let records: Vec<PostRecord> = serde_json::from_str(
            r#"[
                {"id":1,"title":{"rendered":null},"excerpt":null,"link":null},
                {"id":2,"title":{"rendered":"Bern"},"link":"https://example.test/?p=2"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].title, Some(Rendered::default()));
        assert_eq!(records[0].excerpt, None);
        assert_eq!(records[0].link, None);
        assert_eq!(records[1].title, Some("Bern".into()));
    }
}
