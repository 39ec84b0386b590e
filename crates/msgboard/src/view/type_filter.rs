//! Type selector chips.

use iced::widget::{Row, button, column, container, text};
use iced::{Element, Length};

use msgboard_core::dashboard::TypeOption;

use crate::message::Message;
use crate::style::widgets::{card_style, chip_button_style};

/// Renders the type chips, "all types" first.
pub fn view_type_filter(options: &[TypeOption]) -> Element<'static, Message> {
    let title = text("Types").size(15).font(iced::Font {
        weight: iced::font::Weight::Semibold,
        ..Default::default()
    });

    let chips = options.iter().fold(
        Row::new().spacing(8).align_y(iced::Alignment::Center),
        |chips, option| {
            chips.push(
                button(text(option.label.clone()).size(13))
                    .padding([6, 14])
                    .style(chip_button_style(option.selected))
                    .on_press(Message::SelectType(option.filter.clone())),
            )
        },
    );

    container(column![title, chips.wrap()].spacing(10))
        .padding(16)
        .width(Length::Fill)
        .style(card_style)
        .into()
}
