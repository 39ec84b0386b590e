//! Date chips and the entry point to the full date picker.

use iced::widget::{Row, button, column, container, row, text};
use iced::{Element, Length};

use msgboard_core::dashboard::{DateChip, DatePanel};

use crate::message::Message;
use crate::style::widgets::{card_style, chip_button_style, palette, toolbar_button_style};

/// Renders the date bar.
pub fn view_date_bar(panel: &DatePanel) -> Element<'static, Message> {
    let title = text("Dates").size(15).font(iced::Font {
        weight: iced::font::Weight::Semibold,
        ..Default::default()
    });

    let body: Element<'static, Message> = match panel {
        DatePanel::Loading => muted("Chargement des dates...").into(),
        DatePanel::Empty => column![
            muted("Aucune date disponible."),
            muted("Utilisez \u{ab} Init Données Test \u{bb} pour insérer des messages d'exemple."),
        ]
        .spacing(4)
        .into(),
        DatePanel::Chips {
            chips,
            hidden,
            picked,
        } => {
            let mut chip_row = Row::new().spacing(8).align_y(iced::Alignment::Center);
            for chip in chips {
                chip_row = chip_row.push(view_chip(chip));
            }
            if let Some(chip) = picked {
                chip_row = chip_row.push(text("\u{2026}").size(14)).push(view_chip(chip));
            }

            let picker_label = if *hidden > 0 {
                format!("\u{1F4C5} Toutes les dates (+{hidden})")
            } else {
                "\u{1F4C5} Calendrier".to_string()
            };
            let picker_btn = button(text(picker_label).size(13))
                .padding([6, 12])
                .style(toolbar_button_style)
                .on_press(Message::OpenDatePicker);

            row![
                container(chip_row).width(Length::Fill),
                picker_btn
            ]
            .spacing(12)
            .align_y(iced::Alignment::Center)
            .into()
        }
    };

    container(column![title, body].spacing(10))
        .padding(16)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

fn view_chip(chip: &DateChip) -> Element<'static, Message> {
    button(text(chip.label.clone()).size(13))
        .padding([6, 14])
        .style(chip_button_style(chip.selected))
        .on_press(Message::SelectDate(chip.token.clone()))
        .into()
}

fn muted(label: &'static str) -> iced::widget::Text<'static> {
    text(label).size(13).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_secondary),
        }
    })
}
