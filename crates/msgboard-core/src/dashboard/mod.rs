//! Dashboard state record.
//!
//! [`Dashboard`] holds everything the screen shows. It changes only through
//! its transition methods, each of which returns the [`Effect`]s the caller
//! must run (HTTP calls, timers). Results come back through the matching
//! `*_loaded` / `*_finished` transitions.

mod view;

pub use view::{
    Banner, DateChip, DatePanel, DebugSnapshot, ListPanel, PickerView, TypeOption,
    ALL_TYPES_LABEL,
};

use std::time::Duration;

use chrono::NaiveDate;

use crate::api::{Catalog, DatabaseConfig, Message, RepairReport};
use crate::calendar::{self, MonthCursor};
use crate::date::{self, DateToken};
use crate::error::Result;
use crate::filter::{
    Completion, FetchPhase, FetchTicket, FilterCoordinator, Selection, StalePolicy, TypeFilter,
};

/// How long a transient notice stays up.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(6);

const MESSAGES_FAILED: &str = "Impossible de charger les messages.";
const CONNECT_FAILED: &str = "Impossible de se connecter à l'API.";
const RELOAD_FAILED: &str = "Impossible de recharger les dates et les types.";
const SEED_FAILED: &str = "Échec de l'initialisation des données de test.";
const DB_CONFIG_FAILED: &str =
    "Erreur lors de la récupération de la configuration de la base de données.";
const REPAIR_FAILED: &str = "Erreur lors de la réparation des messages.";

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load dates then types.
    LoadCatalog,
    /// Fetch messages for a ticket and report back with it.
    FetchMessages(FetchTicket),
    /// Seed test data.
    SeedTestData,
    /// Fetch the database configuration.
    LoadDatabaseConfig,
    /// Run the field casing repair.
    RepairMessages,
    /// Expire a notice after a delay.
    ExpireNotice {
        /// Notice to expire.
        id: u64,
        /// Delay.
        after: Duration,
    },
}

/// State of the connection to the API, as seen by the initial load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Connection {
    /// Initial load not finished yet.
    #[default]
    Connecting,
    /// Dates and types loaded at least once.
    Connected,
    /// The initial load failed; carries the error text.
    Failed(String),
}

/// A transient, dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Identifier used to match expiry timers.
    pub id: u64,
    /// Text shown to the user.
    pub text: String,
}

/// Administrative action in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    /// Seeding test data.
    Seeding,
    /// Repairing field casing.
    Repairing,
}

/// Modal content.
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Database configuration; `None` while loading.
    DatabaseConfig(Option<DatabaseConfig>),
    /// Result of a repair.
    Repair(RepairReport),
    /// Full date picker showing a month.
    DatePicker(MonthCursor),
}

/// The dashboard state record.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dates: Vec<DateToken>,
    types: Vec<String>,
    connection: Connection,
    catalog_loading: bool,
    reload_pending: bool,
    filter: FilterCoordinator,
    busy: Option<AdminAction>,
    notice: Option<Notice>,
    notice_seq: u64,
    dialog: Option<Dialog>,
    debug: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(StalePolicy::default())
    }
}

impl Dashboard {
    /// Creates an empty dashboard. The debug panel starts enabled.
    #[must_use]
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            dates: Vec::new(),
            types: Vec::new(),
            connection: Connection::Connecting,
            catalog_loading: false,
            reload_pending: false,
            filter: FilterCoordinator::new(policy),
            busy: None,
            notice: None,
            notice_seq: 0,
            dialog: None,
            debug: true,
        }
    }

    // === Accessors ===

    /// Known dates, most recent first, unparseable ones last.
    #[must_use]
    pub fn dates(&self) -> &[DateToken] {
        &self.dates
    }

    /// Known types, in server order.
    #[must_use]
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        self.filter.selection()
    }

    /// Phase of the message list.
    #[must_use]
    pub const fn phase(&self) -> &FetchPhase {
        self.filter.phase()
    }

    /// Messages for the current selection.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.filter.messages()
    }

    /// Connection state.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Current notice.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Open dialog.
    #[must_use]
    pub const fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Administrative action in progress.
    #[must_use]
    pub const fn busy(&self) -> Option<AdminAction> {
        self.busy
    }

    /// Whether the debug panel is shown.
    #[must_use]
    pub const fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Whether dates and types are being loaded.
    #[must_use]
    pub const fn catalog_loading(&self) -> bool {
        self.catalog_loading
    }

    /// Whether any request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.catalog_loading || self.filter.is_loading() || self.busy.is_some()
    }

    // === Catalog ===

    /// Starts the initial load.
    pub fn start(&mut self) -> Vec<Effect> {
        self.load_catalog()
    }

    /// Retries the initial load after a failure.
    pub fn retry(&mut self) -> Vec<Effect> {
        tracing::info!("Retrying connection");
        if matches!(self.connection, Connection::Failed(_)) {
            self.connection = Connection::Connecting;
        }
        self.notice = None;
        self.load_catalog()
    }

    /// Reloads dates and types.
    pub fn reload(&mut self) -> Vec<Effect> {
        self.load_catalog()
    }

    // A request made while a load is in flight is queued, since the
    // in-flight response may predate a seed or repair.
    fn load_catalog(&mut self) -> Vec<Effect> {
        if self.catalog_loading {
            self.reload_pending = true;
            return Vec::new();
        }
        self.catalog_loading = true;
        vec![Effect::LoadCatalog]
    }

    /// Applies the outcome of a catalog load.
    ///
    /// Keeps the selected date if it still exists; otherwise selects the most
    /// recent one. A reload requested meanwhile is issued afterwards.
    pub fn catalog_loaded(&mut self, result: Result<Catalog>) -> Vec<Effect> {
        self.catalog_loading = false;
        let mut effects = self.apply_catalog(result);
        if std::mem::take(&mut self.reload_pending) {
            tracing::debug!("Issuing queued catalog reload");
            effects.extend(self.load_catalog());
        }
        effects
    }

    fn apply_catalog(&mut self, result: Result<Catalog>) -> Vec<Effect> {
        match result {
            Ok(catalog) => {
                tracing::info!(
                    "Catalog loaded: {} dates, {} types",
                    catalog.dates.len(),
                    catalog.types.len()
                );
                self.dates = date::sorted(&catalog.dates);
                self.types = catalog.types;
                self.connection = Connection::Connected;

                let current = self.filter.selection().date.clone();
                let ticket = match current {
                    Some(current) if self.dates.contains(&current) => self.filter.refresh(),
                    _ => match self.dates.first().cloned() {
                        Some(latest) => self.filter.select_date(latest),
                        None => {
                            self.filter.clear_date();
                            None
                        }
                    },
                };
                ticket.map(Effect::FetchMessages).into_iter().collect()
            }
            Err(e) => {
                tracing::error!("Failed to load catalog: {}", e);
                if self.connection == Connection::Connected {
                    self.raise(RELOAD_FAILED)
                } else {
                    self.connection = Connection::Failed(e.to_string());
                    self.raise(CONNECT_FAILED)
                }
            }
        }
    }

    // === Selection ===

    /// Selects a date.
    pub fn select_date(&mut self, date: DateToken) -> Vec<Effect> {
        self.filter
            .select_date(date)
            .map(Effect::FetchMessages)
            .into_iter()
            .collect()
    }

    /// Selects a type filter.
    pub fn select_type(&mut self, kind: TypeFilter) -> Vec<Effect> {
        self.filter
            .select_type(kind)
            .map(Effect::FetchMessages)
            .into_iter()
            .collect()
    }

    /// Applies the outcome of a message fetch.
    pub fn messages_loaded(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<Message>>,
    ) -> Vec<Effect> {
        let failed = result.is_err();
        match self.filter.complete(ticket, result) {
            Completion::Applied if failed => self.raise(MESSAGES_FAILED),
            _ => Vec::new(),
        }
    }

    // === Administrative actions ===

    /// Starts seeding test data.
    pub fn seed(&mut self) -> Vec<Effect> {
        if self.busy.is_some() {
            return Vec::new();
        }
        self.busy = Some(AdminAction::Seeding);
        self.notice = None;
        vec![Effect::SeedTestData]
    }

    /// Applies the outcome of seeding; reloads the catalog on success.
    pub fn seed_finished(&mut self, seeded: bool) -> Vec<Effect> {
        self.busy = None;
        if seeded {
            self.load_catalog()
        } else {
            self.raise(SEED_FAILED)
        }
    }

    /// Opens the database configuration dialog and requests its content.
    pub fn open_database_config(&mut self) -> Vec<Effect> {
        self.dialog = Some(Dialog::DatabaseConfig(None));
        vec![Effect::LoadDatabaseConfig]
    }

    /// Fills the database configuration dialog, or closes it on failure.
    pub fn database_config_loaded(&mut self, result: Result<DatabaseConfig>) -> Vec<Effect> {
        let waiting = matches!(self.dialog, Some(Dialog::DatabaseConfig(_)));
        match result {
            Ok(config) if waiting => {
                self.dialog = Some(Dialog::DatabaseConfig(Some(config)));
                Vec::new()
            }
            Ok(_) => Vec::new(),
            Err(e) => {
                tracing::error!("Failed to load database config: {}", e);
                if waiting {
                    self.dialog = None;
                }
                self.raise(DB_CONFIG_FAILED)
            }
        }
    }

    /// Starts the field casing repair.
    pub fn repair(&mut self) -> Vec<Effect> {
        if self.busy.is_some() {
            return Vec::new();
        }
        self.busy = Some(AdminAction::Repairing);
        vec![Effect::RepairMessages]
    }

    /// Shows the repair report and reloads the catalog.
    pub fn repair_finished(&mut self, result: Result<RepairReport>) -> Vec<Effect> {
        self.busy = None;
        match result {
            Ok(report) => {
                tracing::info!(
                    "Repair finished: {}",
                    report.summary().unwrap_or("no summary")
                );
                self.dialog = Some(Dialog::Repair(report));
                self.load_catalog()
            }
            Err(e) => {
                tracing::error!("Repair failed: {}", e);
                self.raise(REPAIR_FAILED)
            }
        }
    }

    // === Date picker ===

    /// Opens the full date picker on the most relevant month.
    pub fn open_picker(&mut self, today: NaiveDate) {
        let cursor =
            MonthCursor::initial(&self.dates, self.filter.selection().date.as_ref(), today);
        self.dialog = Some(Dialog::DatePicker(cursor));
    }

    /// Shows the previous month in the picker.
    pub fn picker_prev(&mut self) {
        if let Some(Dialog::DatePicker(cursor)) = &mut self.dialog {
            *cursor = cursor.prev();
        }
    }

    /// Shows the next month in the picker, unless it lies in the future.
    pub fn picker_next(&mut self, today: NaiveDate) {
        if let Some(Dialog::DatePicker(cursor)) = &mut self.dialog
            && cursor.can_advance(today)
        {
            *cursor = cursor.next();
        }
    }

    /// Selects the first date that falls on `day` and closes the picker.
    pub fn pick_day(&mut self, day: NaiveDate) -> Vec<Effect> {
        let Some(token) = calendar::token_for_day(&self.dates, day).cloned() else {
            tracing::debug!("No date on {}", day);
            return Vec::new();
        };
        self.pick_token(token)
    }

    /// Selects a date from the picker and closes it.
    pub fn pick_token(&mut self, token: DateToken) -> Vec<Effect> {
        if matches!(self.dialog, Some(Dialog::DatePicker(_))) {
            self.dialog = None;
        }
        self.select_date(token)
    }

    // === Chrome ===

    /// Closes the open dialog.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Dismisses the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Expires a notice if it is still the one shown.
    pub fn notice_expired(&mut self, id: u64) {
        if self.notice.as_ref().is_some_and(|n| n.id == id) {
            self.notice = None;
        }
    }

    /// Closes the dialog if one is open, otherwise dismisses the notice.
    pub fn escape(&mut self) {
        if self.dialog.is_some() {
            self.dialog = None;
        } else {
            self.notice = None;
        }
    }

    /// Shows or hides the debug panel.
    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
    }

    fn raise(&mut self, text: &str) -> Vec<Effect> {
        self.notice_seq += 1;
        let id = self.notice_seq;
        self.notice = Some(Notice {
            id,
            text: text.to_string(),
        });
        vec![Effect::ExpireNotice {
            id,
            after: NOTICE_TIMEOUT,
        }]
    }
}
