//! Message list with its loading and empty states.

use iced::widget::{Column, column, container, row, scrollable, text};
use iced::{Element, Length};

use msgboard_core::dashboard::ListPanel;

use crate::message::Message;
use crate::style::widgets::{card_style, message_row_style, palette, scrollable_style, tag_style};

/// Renders the message list panel.
pub fn view_message_list(panel: &ListPanel<'_>) -> Element<'static, Message> {
    let content: Element<'static, Message> = match panel {
        ListPanel::Loading => placeholder("\u{23F3}", "Chargement des messages...".to_string()),
        ListPanel::NoDateSelected => placeholder(
            "\u{1F4C5}",
            "Veuillez sélectionner une date pour afficher les messages.".to_string(),
        ),
        ListPanel::NoMatches { date, kind } => {
            let detail = match kind {
                Some(kind) => format!("Aucun message trouvé pour le {date} et le type {kind}."),
                None => format!("Aucun message trouvé pour le {date}."),
            };
            placeholder("\u{1F4ED}", detail)
        }
        ListPanel::Messages { date, messages } => {
            let count = messages.len();
            let header = text(format!(
                "{count} message{} pour le {date}",
                if count > 1 { "s" } else { "" }
            ))
            .size(15)
            .font(iced::Font {
                weight: iced::font::Weight::Semibold,
                ..Default::default()
            });

            let rows = messages
                .iter()
                .fold(Column::new().spacing(8), |rows, message| {
                    rows.push(view_row(message))
                });

            column![
                header,
                scrollable(rows.padding([0, 8]))
                    .height(Length::Fill)
                    .style(scrollable_style),
            ]
            .spacing(12)
            .into()
        }
    };

    container(content)
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(card_style)
        .into()
}

fn view_row(message: &msgboard_core::Message) -> Element<'static, Message> {
    let p = palette::current();

    let tag = container(text(message.kind.clone()).size(11).font(iced::Font {
        weight: iced::font::Weight::Bold,
        ..Default::default()
    }))
    .padding([2, 10])
    .style(tag_style(p.for_kind(&message.kind)));

    let date = text(message.date.to_string()).size(12).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_muted),
        }
    });

    container(
        column![
            row![tag, date].spacing(10).align_y(iced::Alignment::Center),
            text(message.body.clone()).size(14),
        ]
        .spacing(6),
    )
    .padding([10, 14])
    .width(Length::Fill)
    .style(message_row_style)
    .into()
}

fn placeholder(icon: &'static str, label: String) -> Element<'static, Message> {
    container(
        column![
            text(icon).size(40),
            text(label).size(15).style(|_theme| {
                let p = palette::current();
                text::Style {
                    color: Some(p.text_secondary),
                }
            }),
        ]
        .spacing(12)
        .align_x(iced::Alignment::Center),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
