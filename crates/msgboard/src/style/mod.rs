//! Styling and theming for the dashboard.

pub mod widgets;
