//! Generation-counted highlight session.
//!
//! Every submitted `(page, query)` pair gets a strictly increasing generation.
//! A finished computation is published only when its generation is still the
//! latest one issued; anything older is dropped without a trace. Computations
//! are never interrupted, they just lose the race.
//!
//! ```text
//!   Idle ──submit──► Computing(N) ──complete(N), N latest──► Applied(N)
//!                        │  ▲                                   │
//!                        │  └──────────────submit───────────────┘
//!                        └──complete(M), M < latest──► (discarded)
//!   any ──clear──► Idle (published result dropped)
//! ```

use crate::geometry::Rect;
use crate::search::SearchQuery;
use serde::{Deserialize, Serialize};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing requested, nothing shown
    Idle,
    /// Waiting on the computation for this generation
    Computing(u64),
    /// The result of this generation is on screen
    Applied(u64),
}

/// What happened to a completed computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The result is now the published highlight
    Applied,
    /// A newer request was issued first; the result was discarded
    Superseded,
}

/// Handle for one in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightTicket {
    generation: u64,
    query: SearchQuery,
}

impl HighlightTicket {
    /// Generation this ticket was issued under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The request being computed.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Target page.
    pub fn page(&self) -> u32 {
        self.query.page()
    }
}

/// The highlight the overlay should draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedHighlight {
    /// Generation that produced this result
    pub generation: u64,
    /// Page the rectangles belong to
    pub page: u32,
    /// Viewport rectangles; empty when nothing matched
    pub rects: Vec<Rect>,
}

/// Tagged state machine `{generation, status, result}`.
#[derive(Debug, Clone)]
pub struct HighlightSession {
    generation: u64,
    status: SessionStatus,
    result: Option<PublishedHighlight>,
}

impl Default for HighlightSession {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self {
            generation: 0,
            status: SessionStatus::Idle,
            result: None,
        }
    }

    /// Issue a new generation for `query`.
    ///
    /// The currently published highlight stays visible until the new one is
    /// applied.
    pub fn submit(&mut self, query: SearchQuery) -> HighlightTicket {
        self.generation += 1;
        self.status = SessionStatus::Computing(self.generation);
        log::trace!(
            "Highlight generation {} submitted for page {}",
            self.generation,
            query.page()
        );
        HighlightTicket {
            generation: self.generation,
            query,
        }
    }

    /// Offer a finished result.
    ///
    /// Only the latest generation that is still being computed is applied.
    /// Results for older generations, or arriving after [`clear`](Self::clear),
    /// are discarded.
    pub fn complete(&mut self, ticket: &HighlightTicket, rects: Vec<Rect>) -> CompletionOutcome {
        if self.status != SessionStatus::Computing(ticket.generation) {
            log::trace!(
                "Discarding stale highlight generation {} (latest {})",
                ticket.generation,
                self.generation
            );
            return CompletionOutcome::Superseded;
        }

        log::debug!(
            "Applying highlight generation {}: {} rect(s) on page {}",
            ticket.generation,
            rects.len(),
            ticket.page()
        );
        self.status = SessionStatus::Applied(ticket.generation);
        self.result = Some(PublishedHighlight {
            generation: ticket.generation,
            page: ticket.page(),
            rects,
        });
        CompletionOutcome::Applied
    }

    /// Withdraw the current request and anything shown.
    ///
    /// Bumps the generation so in-flight computations become stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.status = SessionStatus::Idle;
        self.result = None;
    }

    /// True when `ticket` is still the one the session is waiting on.
    ///
    /// Callers may use this to skip work that would be discarded anyway.
    pub fn is_current(&self, ticket: &HighlightTicket) -> bool {
        self.status == SessionStatus::Computing(ticket.generation)
    }

    /// Current state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Highest generation issued so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The highlight on screen, if any.
    pub fn published(&self) -> Option<&PublishedHighlight> {
        self.result.as_ref()
    }
}
