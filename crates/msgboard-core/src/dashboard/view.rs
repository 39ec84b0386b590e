//! Read-only projections of the dashboard for rendering.

use chrono::NaiveDate;
use serde::Serialize;

use super::{Connection, Dashboard, Dialog};
use crate::api::Message;
use crate::calendar::{self, MonthGrid};
use crate::date::{DateFormatter, DateToken};
use crate::filter::{self, FetchPhase, TypeFilter};

/// Label of the "all types" selector.
pub const ALL_TYPES_LABEL: &str = "Tous les types";

/// A date shown as a chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateChip {
    /// Token to select.
    pub token: DateToken,
    /// Display label.
    pub label: String,
    /// Whether this is the selected date.
    pub selected: bool,
}

/// The date bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatePanel {
    /// Dates are loading.
    Loading,
    /// The server has no dates.
    Empty,
    /// Most recent dates inline.
    Chips {
        /// Inline chips, most recent first.
        chips: Vec<DateChip>,
        /// Dates reachable only through the picker.
        hidden: usize,
        /// The selected date when it is not among the inline chips.
        picked: Option<DateChip>,
    },
}

/// One entry of the type selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeOption {
    /// Filter applied when chosen.
    pub filter: TypeFilter,
    /// Display label.
    pub label: String,
    /// Whether this is the active filter.
    pub selected: bool,
}

/// The message list area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPanel<'a> {
    /// A fetch is in flight.
    Loading,
    /// No date is selected yet.
    NoDateSelected,
    /// The selection yields no messages.
    NoMatches {
        /// Label of the selected date.
        date: String,
        /// Selected type, if filtered.
        kind: Option<String>,
    },
    /// Messages to show.
    Messages {
        /// Label of the selected date.
        date: String,
        /// The messages.
        messages: &'a [Message],
    },
}

/// Persistent connection failure banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Error detail.
    pub detail: String,
    /// A retry is in flight.
    pub retrying: bool,
}

/// The full date picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView<'a> {
    /// Month grid.
    pub grid: MonthGrid,
    /// Title, e.g. "mars 2024".
    pub title: String,
    /// Tokens that cannot be placed on the grid.
    pub unplaced: Vec<&'a DateToken>,
}

/// State summary shown in the debug panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSnapshot {
    /// Any request in flight.
    pub loading: bool,
    /// Whether the catalog loaded.
    pub api_connected: bool,
    /// Selected date, raw.
    pub selected_date: Option<String>,
    /// Selected type.
    pub selected_type: Option<String>,
    /// Number of dates.
    pub date_count: usize,
    /// Number of types.
    pub type_count: usize,
    /// Number of messages.
    pub message_count: usize,
    /// Last fetch error.
    pub error: Option<String>,
}

impl Dashboard {
    /// Projects the date bar.
    #[must_use]
    pub fn date_panel(&self, formatter: &DateFormatter) -> DatePanel {
        if self.dates.is_empty() {
            return if self.catalog_loading {
                DatePanel::Loading
            } else {
                DatePanel::Empty
            };
        }
        let selected = self.selection().date.as_ref();
        let chip = |token: &DateToken| DateChip {
            token: token.clone(),
            label: formatter.label(token),
            selected: Some(token) == selected,
        };
        let (inline, hidden) = filter::split_inline(&self.dates);
        let picked = selected
            .filter(|s| !inline.contains(s))
            .map(|s| chip(s));
        DatePanel::Chips {
            chips: inline.iter().map(chip).collect(),
            hidden,
            picked,
        }
    }

    /// Projects the type selector, starting with [`ALL_TYPES_LABEL`].
    #[must_use]
    pub fn type_options(&self) -> Vec<TypeOption> {
        let active = &self.selection().kind;
        std::iter::once(TypeFilter::All)
            .chain(self.types.iter().map(|t| TypeFilter::Only(t.clone())))
            .map(|filter| TypeOption {
                label: filter.as_type().unwrap_or(ALL_TYPES_LABEL).to_string(),
                selected: &filter == active,
                filter,
            })
            .collect()
    }

    /// Projects the message list.
    #[must_use]
    pub fn list_panel(&self, formatter: &DateFormatter) -> ListPanel<'_> {
        let selection = self.selection();
        let Some(date) = selection.date.as_ref() else {
            return ListPanel::NoDateSelected;
        };
        let date = formatter.label(date);
        match self.phase() {
            FetchPhase::Loading => ListPanel::Loading,
            FetchPhase::Idle => ListPanel::NoDateSelected,
            FetchPhase::Ready if !self.messages().is_empty() => ListPanel::Messages {
                date,
                messages: self.messages(),
            },
            FetchPhase::Ready | FetchPhase::Error(_) => ListPanel::NoMatches {
                date,
                kind: selection.kind.as_type().map(str::to_string),
            },
        }
    }

    /// Projects the connection banner, shown only after a failed initial load.
    #[must_use]
    pub fn banner(&self) -> Option<Banner> {
        match &self.connection {
            Connection::Failed(detail) => Some(Banner {
                detail: detail.clone(),
                retrying: self.catalog_loading,
            }),
            Connection::Connecting | Connection::Connected => None,
        }
    }

    /// Projects the date picker, if open.
    #[must_use]
    pub fn picker(&self, formatter: &DateFormatter, today: NaiveDate) -> Option<PickerView<'_>> {
        let Some(Dialog::DatePicker(cursor)) = &self.dialog else {
            return None;
        };
        let grid = MonthGrid::build(*cursor, &self.dates, self.selection().date.as_ref(), today);
        Some(PickerView {
            title: formatter
                .clone()
                .with_pattern("%B %Y")
                .format_date(cursor.first_day()),
            grid,
            unplaced: calendar::unplaced(&self.dates),
        })
    }

    /// Summary for the debug panel.
    #[must_use]
    pub fn debug_snapshot(&self) -> DebugSnapshot {
        let selection = self.selection();
        DebugSnapshot {
            loading: self.is_loading(),
            api_connected: self.connection == Connection::Connected,
            selected_date: selection.date.as_ref().map(ToString::to_string),
            selected_type: selection.kind.as_type().map(str::to_string),
            date_count: self.dates.len(),
            type_count: self.types.len(),
            message_count: self.messages().len(),
            error: match self.phase() {
                FetchPhase::Error(e) => Some(e.clone()),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::api::Catalog;
    use crate::dashboard::Effect;
    use crate::error::Error;
    use crate::filter::FetchTicket;
    use chrono::Locale;

    fn loaded(dates: &[&str], types: &[&str]) -> (Dashboard, Option<FetchTicket>) {
        let mut dashboard = Dashboard::default();
        dashboard.start();
        let effects = dashboard.catalog_loaded(Ok(Catalog {
            dates: dates.iter().copied().map(DateToken::new).collect(),
            types: types.iter().map(ToString::to_string).collect(),
        }));
        let ticket = effects.into_iter().find_map(|e| match e {
            Effect::FetchMessages(t) => Some(t),
            _ => None,
        });
        (dashboard, ticket)
    }

    fn formatter() -> DateFormatter {
        DateFormatter::new(Locale::en_US)
    }

    #[test]
    fn test_date_panel_loading_and_empty() {
        let mut dashboard = Dashboard::default();
        dashboard.start();
        assert_eq!(dashboard.date_panel(&formatter()), DatePanel::Loading);
        dashboard.catalog_loaded(Ok(Catalog::default()));
        assert_eq!(dashboard.date_panel(&formatter()), DatePanel::Empty);
    }

    #[test]
    fn test_date_panel_inline_limit() {
        let dates: Vec<String> = (1..=9).map(|d| format!("2023-01-0{d}")).collect();
        let refs: Vec<&str> = dates.iter().map(String::as_str).collect();
        let (mut dashboard, _) = loaded(&refs, &[]);

        let DatePanel::Chips { chips, hidden, picked } = dashboard.date_panel(&formatter()) else {
            panic!("expected chips");
        };
        assert_eq!(chips.len(), 7);
        assert_eq!(hidden, 2);
        assert_eq!(chips[0].label, "9 Jan 2023");
        assert!(chips[0].selected);
        assert!(picked.is_none());

        dashboard.select_date(DateToken::new("2023-01-01"));
        let DatePanel::Chips { picked, chips, .. } = dashboard.date_panel(&formatter()) else {
            panic!("expected chips");
        };
        assert_eq!(picked.unwrap().label, "1 Jan 2023");
        assert!(chips.iter().all(|c| !c.selected));
    }

    #[test]
    fn test_type_options() {
        let (mut dashboard, _) = loaded(&["2023-01-01"], &["INFO", "ERROR"]);
        let options = dashboard.type_options();
        assert_eq!(
            options.iter().map(|o| o.label.as_str()).collect::<Vec<_>>(),
            vec![ALL_TYPES_LABEL, "INFO", "ERROR"]
        );
        assert!(options[0].selected);

        dashboard.select_type(TypeFilter::Only("ERROR".into()));
        let options = dashboard.type_options();
        assert!(!options[0].selected);
        assert!(options[2].selected);
    }

    #[test]
    fn test_list_panel_states() {
        let dashboard = Dashboard::default();
        assert_eq!(dashboard.list_panel(&formatter()), ListPanel::NoDateSelected);

        let (mut dashboard, ticket) = loaded(&["2023-01-02"], &["INFO"]);
        assert_eq!(dashboard.list_panel(&formatter()), ListPanel::Loading);

        let ticket = ticket.unwrap();
        dashboard.messages_loaded(&ticket, Ok(Vec::new()));
        assert_eq!(
            dashboard.list_panel(&formatter()),
            ListPanel::NoMatches {
                date: "2 Jan 2023".into(),
                kind: None
            }
        );

        let ticket = match dashboard
            .select_type(TypeFilter::Only("INFO".into()))
            .pop()
            .unwrap()
        {
            Effect::FetchMessages(t) => t,
            other => panic!("unexpected {other:?}"),
        };
        let messages = vec![Message::new("2023-01-02", "INFO", "hello")];
        dashboard.messages_loaded(&ticket, Ok(messages.clone()));
        assert_eq!(
            dashboard.list_panel(&formatter()),
            ListPanel::Messages {
                date: "2 Jan 2023".into(),
                messages: &messages
            }
        );
    }

    #[test]
    fn test_banner_only_after_initial_failure() {
        let mut dashboard = Dashboard::default();
        dashboard.start();
        assert!(dashboard.banner().is_none());
        dashboard.catalog_loaded(Err(Error::Transport {
            url: "http://localhost:8000/messages/dates".into(),
            reason: "refused".into(),
        }));
        let banner = dashboard.banner().unwrap();
        assert!(!banner.retrying);
        assert!(banner.detail.contains("refused"));
        dashboard.retry();
        assert!(dashboard.banner().is_none());
    }

    #[test]
    fn test_picker_projection() {
        let (mut dashboard, _) = loaded(&["2024-03-01", "oops"], &[]);
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert!(dashboard.picker(&formatter(), today).is_none());
        dashboard.open_picker(today);
        let picker = dashboard.picker(&formatter(), today).unwrap();
        assert_eq!(picker.title, "March 2024");
        assert_eq!(picker.unplaced, vec![&DateToken::new("oops")]);
    }

    #[test]
    fn test_debug_snapshot_json() {
        let (dashboard, _) = loaded(&["2023-01-01"], &["INFO"]);
        let snapshot = dashboard.debug_snapshot();
        assert!(snapshot.loading);
        assert!(snapshot.api_connected);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["selectedDate"], "2023-01-01");
        assert_eq!(json["dateCount"], 1);
    }
}
