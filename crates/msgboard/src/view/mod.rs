//! View components for the dashboard.

mod banner;
mod date_bar;
mod debug_panel;
mod dialogs;
mod header;
mod message_list;
mod notice;
mod type_filter;

pub use banner::view_banner;
pub use date_bar::view_date_bar;
pub use debug_panel::view_debug_panel;
pub use dialogs::{modal, view_database_config, view_date_picker, view_repair_report};
pub use header::view_header;
pub use message_list::view_message_list;
pub use notice::view_notice;
pub use type_filter::view_type_filter;
