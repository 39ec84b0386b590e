//! Message types for application events.
//!
//! In the Elm architecture, Messages are events that trigger state changes.

use chrono::NaiveDate;
use msgboard_core::{
    Catalog, DatabaseConfig, DateToken, Error, FetchTicket, RepairReport, TypeFilter,
};

/// Application messages (events).
#[derive(Debug, Clone)]
pub enum Message {
    // Catalog
    /// Dates and types loaded.
    CatalogLoaded(Result<Catalog, Error>),
    /// Retry the initial load from the banner.
    RetryConnection,
    /// Reload dates and types.
    Reload,

    // Selection
    /// A date chip was clicked.
    SelectDate(DateToken),
    /// A type chip was clicked.
    SelectType(TypeFilter),
    /// Messages for a ticket arrived.
    MessagesLoaded(FetchTicket, Result<Vec<msgboard_core::Message>, Error>),

    // Administrative actions
    /// Seed test data.
    SeedTestData,
    /// Seeding finished.
    TestDataSeeded(bool),
    /// Open the database configuration dialog.
    OpenDatabaseConfig,
    /// Database configuration arrived.
    DatabaseConfigLoaded(Result<DatabaseConfig, Error>),
    /// Run the field casing repair.
    RepairMessages,
    /// Repair finished.
    MessagesRepaired(Result<RepairReport, Error>),

    // Date picker
    /// Open the full date picker.
    OpenDatePicker,
    /// Show the previous month.
    PickerPrevMonth,
    /// Show the next month.
    PickerNextMonth,
    /// A day with data was clicked.
    PickDay(NaiveDate),
    /// A date without a calendar day was clicked.
    PickToken(DateToken),

    // Chrome
    /// Close the open dialog.
    CloseDialog,
    /// Dismiss the notice.
    DismissNotice,
    /// A notice timer fired.
    NoticeExpired(u64),
    /// Show or hide the debug panel.
    ToggleDebug,
    /// Switch between light and dark palettes.
    ToggleTheme,

    // Keyboard
    /// Keyboard shortcut pressed.
    KeyPressed(KeyboardAction),
    /// Keyboard event with no binding.
    Ignored,
}

/// Keyboard shortcut actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// F5: reload dates and types.
    Reload,
    /// Escape: close the dialog, else the notice.
    Escape,
    /// Ctrl+D: toggle the debug panel.
    ToggleDebug,
}
