//! Widget styles driven by the active palette.

mod buttons;
mod containers;
pub mod palette;
mod scrollables;
mod shadows;

pub use palette::ThemeMode;

pub use containers::{
    app_style, backdrop_style, banner_style, card_style, code_block_style, dialog_style,
    header_style, message_row_style, notice_style, tag_style,
};

pub use buttons::{
    calendar_day_style, chip_button_style, ghost_button_style, primary_button_style,
    toolbar_button_style,
};

pub use scrollables::scrollable_style;
