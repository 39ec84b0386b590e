//! Debug panel: state summary and raw data as JSON.

use iced::widget::{column, container, scrollable, text};
use iced::{Element, Length};
use serde::Serialize;

use msgboard_core::DateToken;
use msgboard_core::dashboard::DebugSnapshot;

use crate::message::Message;
use crate::style::widgets::{card_style, code_block_style, palette, scrollable_style};

/// Renders the debug panel.
pub fn view_debug_panel(
    snapshot: &DebugSnapshot,
    dates: &[DateToken],
    types: &[String],
    messages: &[msgboard_core::Message],
) -> Element<'static, Message> {
    let sections = column![
        text("Mode débogage").size(15).font(iced::Font {
            weight: iced::font::Weight::Semibold,
            ..Default::default()
        }),
        section("État", snapshot),
        section(&format!("Dates ({})", dates.len()), dates),
        section(&format!("Types ({})", types.len()), types),
        section(&format!("Messages ({})", messages.len()), messages),
    ]
    .spacing(12);

    container(scrollable(sections).style(scrollable_style))
        .padding(16)
        .width(Length::Fixed(360.0))
        .height(Length::Fill)
        .style(card_style)
        .into()
}

fn section<T: Serialize + ?Sized>(title: &str, value: &T) -> Element<'static, Message> {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        tracing::warn!("Failed to render debug JSON: {}", e);
        String::from("<unavailable>")
    });

    column![
        text(title.to_string()).size(12).style(|_theme| {
            let p = palette::current();
            text::Style {
                color: Some(p.text_secondary),
            }
        }),
        container(text(json).size(11).font(iced::Font::MONOSPACE))
            .padding(8)
            .width(Length::Fill)
            .style(code_block_style),
    ]
    .spacing(4)
    .into()
}
