//! Header bar with the title and administrative actions.

use iced::widget::{button, container, row, text};
use iced::{Element, Length};

use msgboard_core::dashboard::AdminAction;

use crate::message::Message;
use crate::style::widgets::{
    ThemeMode, ghost_button_style, header_style, palette, primary_button_style,
    toolbar_button_style,
};

/// Renders the header bar.
pub fn view_header(
    busy: Option<AdminAction>,
    loading: bool,
    debug_enabled: bool,
    theme_mode: ThemeMode,
) -> Element<'static, Message> {
    let title = text("Tableau de bord des messages")
        .size(22)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        })
        .style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.primary),
            }
        });

    // `loading` covers admin actions as well as catalog and message fetches.
    let idle = busy.is_none() && !loading;

    let repair_label = if busy == Some(AdminAction::Repairing) {
        "Réparation..."
    } else {
        "Réparer Messages"
    };
    let repair_btn = button(text(repair_label).size(13))
        .padding([8, 14])
        .style(toolbar_button_style)
        .on_press_maybe(idle.then_some(Message::RepairMessages));

    let seed_label = if busy == Some(AdminAction::Seeding) {
        "Initialisation..."
    } else {
        "Init Données Test"
    };
    let seed_btn = button(text(seed_label).size(13))
        .padding([8, 14])
        .style(primary_button_style)
        .on_press_maybe(idle.then_some(Message::SeedTestData));

    let db_btn = button(text("Config DB").size(13))
        .padding([8, 14])
        .style(toolbar_button_style)
        .on_press(Message::OpenDatabaseConfig);

    let debug_btn = button(
        text(if debug_enabled { "Debug: ON" } else { "Debug: OFF" }).size(13),
    )
    .padding([8, 14])
    .style(toolbar_button_style)
    .on_press(Message::ToggleDebug);

    let reload_btn = button(text("\u{21BB}").size(18))
        .padding([6, 10])
        .style(ghost_button_style)
        .on_press_maybe((!loading).then_some(Message::Reload));

    let theme_icon = match theme_mode {
        ThemeMode::Light => "\u{263E}",
        ThemeMode::Dark => "\u{2600}",
    };
    let theme_btn = button(text(theme_icon).size(18))
        .padding([6, 10])
        .style(ghost_button_style)
        .on_press(Message::ToggleTheme);

    let content = row![
        title,
        iced::widget::Space::new().width(Length::Fill),
        repair_btn,
        seed_btn,
        db_btn,
        debug_btn,
        reload_btn,
        theme_btn,
    ]
    .spacing(10)
    .padding([12, 20])
    .align_y(iced::Alignment::Center);

    container(content)
        .width(Length::Fill)
        .style(header_style)
        .into()
}
