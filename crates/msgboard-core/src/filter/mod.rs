//! Date and type selection, and the fetch state machine behind the message list.
//!
//! Every selection change that needs data returns a [`FetchTicket`]. The
//! caller runs the fetch and hands the ticket back to
//! [`FilterCoordinator::complete`] together with the outcome. Tickets carry a
//! generation number so responses that arrive after a newer selection can be
//! discarded, depending on the [`StalePolicy`].

use serde::Serialize;

use crate::api::Message;
use crate::date::DateToken;
use crate::error::Result;

/// Number of most-recent dates shown inline; the rest go through the picker.
pub const INLINE_DATE_LIMIT: usize = 7;

/// Type axis of the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    /// No type filter.
    #[default]
    All,
    /// Only messages of this type.
    Only(String),
}

impl TypeFilter {
    /// Builds a filter from a type label; blank labels mean [`TypeFilter::All`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.trim().is_empty() {
            Self::All
        } else {
            Self::Only(label.to_string())
        }
    }

    /// Type to send to the server, if any.
    #[must_use]
    pub fn as_type(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(kind) => Some(kind),
        }
    }

    /// Returns true for [`TypeFilter::All`].
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// The user's current (date, type) filter pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Selected date, if any.
    pub date: Option<DateToken>,
    /// Selected type filter.
    #[serde(rename = "type")]
    pub kind: TypeFilter,
}

/// State of the message list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchPhase {
    /// No date selected; the list is empty.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The list reflects the selection.
    Ready,
    /// The last fetch failed; the list was cleared.
    Error(String),
}

/// A fetch bound to the selection at the time it was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    selection: Selection,
}

impl FetchTicket {
    /// Monotonic issue number.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Selection to fetch.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }
}

/// How completions from superseded tickets are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Only the newest issued ticket may update the list.
    #[default]
    LatestIssued,
    /// Every completion is applied in arrival order.
    LatestResolved,
}

/// What [`FilterCoordinator::complete`] did with a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome updated the list.
    Applied,
    /// The ticket was superseded and the outcome was dropped.
    Discarded,
}

/// Holds the selection and the message list derived from it.
#[derive(Debug, Clone, Default)]
pub struct FilterCoordinator {
    selection: Selection,
    phase: FetchPhase,
    messages: Vec<Message>,
    issued: u64,
    policy: StalePolicy,
}

impl FilterCoordinator {
    /// Creates an idle coordinator.
    #[must_use]
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    /// Messages for the current selection.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns true while a fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, FetchPhase::Loading)
    }

    /// Stale response policy.
    #[must_use]
    pub const fn policy(&self) -> StalePolicy {
        self.policy
    }

    /// Selects a date and issues a fetch for it.
    ///
    /// A blank token clears the date and returns the coordinator to idle.
    pub fn select_date(&mut self, date: DateToken) -> Option<FetchTicket> {
        if date.is_blank() {
            tracing::debug!("Blank date selected, clearing");
            self.clear_date();
            return None;
        }
        tracing::debug!("Date selected: {}", date);
        self.selection.date = Some(date);
        Some(self.issue())
    }

    /// Selects a type filter.
    ///
    /// Issues a fetch only when a date is already selected.
    pub fn select_type(&mut self, kind: TypeFilter) -> Option<FetchTicket> {
        tracing::debug!("Type selected: {:?}", kind);
        self.selection.kind = kind;
        self.selection.date.is_some().then(|| self.issue())
    }

    /// Re-issues a fetch for the current selection, if a date is selected.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        self.selection.date.is_some().then(|| self.issue())
    }

    /// Drops the selected date and the list.
    pub fn clear_date(&mut self) {
        self.selection.date = None;
        self.messages.clear();
        self.phase = FetchPhase::Idle;
        // Outstanding tickets no longer match anything.
        self.issued += 1;
    }

    /// Applies the outcome of a fetch.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Vec<Message>>) -> Completion {
        if self.policy == StalePolicy::LatestIssued && ticket.generation != self.issued {
            tracing::debug!(
                "Discarding stale fetch #{} (latest #{})",
                ticket.generation,
                self.issued
            );
            return Completion::Discarded;
        }
        match result {
            Ok(messages) => {
                tracing::debug!(
                    "Fetch #{} loaded {} messages",
                    ticket.generation,
                    messages.len()
                );
                self.messages = messages;
                self.phase = FetchPhase::Ready;
            }
            Err(e) => {
                tracing::warn!("Fetch #{} failed: {}", ticket.generation, e);
                self.messages.clear();
                self.phase = FetchPhase::Error(e.to_string());
            }
        }
        Completion::Applied
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.phase = FetchPhase::Loading;
        FetchTicket {
            generation: self.issued,
            selection: self.selection.clone(),
        }
    }
}

/// Splits sorted dates into the inline chips and the number left to the picker.
#[must_use]
pub fn split_inline(sorted: &[DateToken]) -> (&[DateToken], usize) {
    let shown = sorted.len().min(INLINE_DATE_LIMIT);
    (&sorted[..shown], sorted.len() - shown)
}
