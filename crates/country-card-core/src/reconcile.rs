// crates/country-card-core/src/reconcile.rs

//! # Related-Posts Reconciler
//!
//! Turns the selected country into the list of related posts shown in the
//! card footer. The reconciler never performs I/O itself: [`Reconciler::reconcile`]
//! hands out a [`SearchRequest`] when a query is needed, and the caller feeds
//! the host's answer back through [`Reconciler::resolve`].
//!
//! Rules:
//! - no country, no query, empty list;
//! - the country that produced the persisted snapshot gets the snapshot back
//!   verbatim, without a query;
//! - any other country gets exactly one query, tagged with a fresh [`Ticket`];
//! - an answer whose ticket is not the outstanding one is dropped.

use crate::countries::CountryCode;
use crate::error::Result;
use crate::model::{BlockAttributes, PostId, RelatedPost};
use crate::source::{PostQuery, PostRecord, DEFAULT_PER_PAGE};
use log::{debug, warn};

/// Generation counter identifying one issued query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// A query the caller must send to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: Ticket,
    pub country: CountryCode,
    pub query: PostQuery,
}

/// What the footer should show right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciled {
    pub posts: Vec<RelatedPost>,
    pub is_fetching: bool,
    /// Set only on the call that issued the query.
    pub request: Option<SearchRequest>,
}

/// Posts for a country, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPosts {
    pub country: CountryCode,
    pub posts: Vec<RelatedPost>,
}

#[derive(Debug, Clone)]
pub struct Reconciler {
    current_post: Option<PostId>,
    max_posts: usize,
    /// Country whose query produced the persisted `relatedPosts`.
    resolved_for: Option<CountryCode>,
    pending: Option<SearchRequest>,
    next_ticket: u64,
}

impl Reconciler {
    /// `snapshot_country` is the country the persisted posts were fetched for,
    /// normally the `countryCode` the block was loaded with.
    pub fn new(current_post: Option<PostId>, snapshot_country: Option<CountryCode>) -> Self {
        Self {
            current_post,
            max_posts: DEFAULT_PER_PAGE,
            resolved_for: snapshot_country,
            pending: None,
            next_ticket: 1,
        }
    }

    pub fn with_max_posts(mut self, max_posts: usize) -> Self {
        self.max_posts = max_posts;
        self
    }

    pub fn current_post(&self) -> Option<&PostId> {
        self.current_post.as_ref()
    }

    pub fn pending(&self) -> Option<&SearchRequest> {
        self.pending.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop interest in the outstanding query, if any. Its answer will be
    /// treated as stale.
    pub fn supersede(&mut self) {
        if let Some(req) = self.pending.take() {
            debug!(
                "superseding related-posts query #{} for {}",
                req.ticket.0, req.country
            );
        }
    }

    /// Forget the outstanding query and the snapshot's country. Used when the
    /// persisted posts are cleared by a new selection.
    pub fn reset(&mut self) {
        self.supersede();
        self.resolved_for = None;
    }

    pub fn reconcile(&mut self, attrs: &BlockAttributes) -> Reconciled {
        let Some(country) = attrs.country_code else {
            self.supersede();
            return Reconciled::default();
        };

        if self.resolved_for == Some(country) {
            return Reconciled {
                posts: attrs.related_posts.clone(),
                is_fetching: false,
                request: None,
            };
        }

        if let Some(req) = &self.pending {
            if req.country == country {
                return Reconciled {
                    posts: attrs.related_posts.clone(),
                    is_fetching: true,
                    request: None,
                };
            }
        }

        let request = SearchRequest {
            ticket: Ticket(self.next_ticket),
            country,
            query: PostQuery::related_to(country.name()),
        };
        self.next_ticket += 1;
        debug!(
            "issuing related-posts query #{} for {} ({:?})",
            request.ticket.0, country, request.query.search
        );
        self.pending = Some(request.clone());

        Reconciled {
            posts: attrs.related_posts.clone(),
            is_fetching: true,
            request: Some(request),
        }
    }

    /// Apply the host's answer to query `ticket`.
    ///
    /// Returns `None` for stale answers. A failed search resolves to an empty
    /// list so the footer falls back to "no related posts".
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<PostRecord>>,
    ) -> Option<ResolvedPosts> {
        match &self.pending {
            Some(req) if req.ticket == ticket => {}
            _ => {
                warn!("ignoring stale related-posts answer #{}", ticket.0);
                return None;
            }
        }
        let req = self.pending.take()?;
        self.resolved_for = Some(req.country);

        let posts = match outcome {
            Ok(records) => related_posts(records, self.current_post.as_ref(), self.max_posts),
            Err(e) => {
                warn!("related-posts query for {} failed: {e}", req.country);
                Vec::new()
            }
        };
        debug!(
            "related-posts query #{} for {} resolved with {} post(s)",
            ticket.0,
            req.country,
            posts.len()
        );

        Some(ResolvedPosts {
            country: req.country,
            posts,
        })
    }
}

/// Shape raw search results into card posts.
///
/// Drops `current_post` and records without a link, defaults missing titles
/// and excerpts to `""`, keeps the host's order and stops after `max`.
pub fn related_posts(
    records: Vec<PostRecord>,
    current_post: Option<&PostId>,
    max: usize,
) -> Vec<RelatedPost> {
    records
        .into_iter()
        .filter(|r| !current_post.is_some_and(|id| id.same_post(&r.id)))
        .filter_map(|r| {
            let link = r.link.filter(|l| !l.trim().is_empty())?;
            Some(RelatedPost {
                id: r.id,
                title: r.title.map(|t| t.rendered).unwrap_or_default(),
                excerpt: r.excerpt.map(|e| e.rendered).unwrap_or_default(),
                link,
            })
        })
        .take(max)
        .collect()
}
