//! Transient error notice.

use iced::widget::{button, container, row, text};
use iced::{Element, Length};

use msgboard_core::Notice;

use crate::message::Message;
use crate::style::widgets::{ghost_button_style, notice_style, palette};

/// Renders the notice as a bottom-centered bar.
pub fn view_notice(notice: &Notice) -> Element<'static, Message> {
    let close_btn = button(text("\u{2715}").size(14).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.surface),
        }
    }))
    .padding([4, 8])
    .style(ghost_button_style)
    .on_press(Message::DismissNotice);

    let bar = container(
        row![text(notice.text.clone()).size(14), close_btn]
            .spacing(12)
            .align_y(iced::Alignment::Center),
    )
    .padding([10, 16])
    .max_width(560.0)
    .style(notice_style);

    container(bar)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(24)
        .align_x(iced::Alignment::Center)
        .align_y(iced::Alignment::End)
        .into()
}
