//! Modal dialogs: database configuration, repair report and date picker.

use chrono::Datelike;
use iced::widget::{
    Column, Row, button, center, column, container, mouse_area, opaque, row, scrollable, stack,
    text,
};
use iced::{Element, Length};

use msgboard_core::calendar::CalendarDay;
use msgboard_core::dashboard::PickerView;
use msgboard_core::{DatabaseConfig, RepairReport};

use crate::message::Message;
use crate::style::widgets::{
    backdrop_style, calendar_day_style, chip_button_style, code_block_style, dialog_style,
    ghost_button_style, palette, primary_button_style, scrollable_style,
};

const WEEKDAYS: [&str; 7] = ["L", "M", "M", "J", "V", "S", "D"];
const DAY_SIZE: f32 = 40.0;

/// Overlays `content` on `base`; clicking the backdrop closes the dialog.
pub fn modal<'a>(base: Element<'a, Message>, content: Element<'a, Message>) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(content)).style(backdrop_style))
                .on_press(Message::CloseDialog)
        )
    ]
    .into()
}

/// Database configuration dialog; `None` shows a loading line.
pub fn view_database_config(config: Option<&DatabaseConfig>) -> Element<'static, Message> {
    let body: Element<'static, Message> = match config {
        None => secondary("Chargement de la configuration...").into(),
        Some(config) => {
            let collections = config.available_collections().join(", ");
            column![
                field("Base de données", config.database_name().unwrap_or("-")),
                field(
                    "Collection actuelle",
                    config.current_collection().unwrap_or("-")
                ),
                field(
                    "Collections disponibles",
                    if collections.is_empty() { "-" } else { &collections }
                ),
                field(
                    "Nombre de documents",
                    &config
                        .document_count()
                        .map_or_else(|| "-".to_string(), |n| n.to_string())
                ),
                json_block(config.pretty()),
            ]
            .spacing(8)
            .into()
        }
    };

    dialog("Configuration de la base de données", body)
}

/// Repair report dialog.
pub fn view_repair_report(report: &RepairReport) -> Element<'static, Message> {
    let summary = text(
        report
            .summary()
            .unwrap_or("Réparation terminée.")
            .to_string(),
    )
    .size(14);

    dialog(
        "Résultat de la réparation",
        column![summary, json_block(report.pretty())]
            .spacing(12)
            .into(),
    )
}

/// Month calendar with previous/next navigation.
pub fn view_date_picker(picker: &PickerView<'_>) -> Element<'static, Message> {
    let nav = row![
        button(text("\u{25C0}").size(14))
            .padding([4, 10])
            .style(ghost_button_style)
            .on_press(Message::PickerPrevMonth),
        container(text(capitalize(&picker.title)).size(15).font(iced::Font {
            weight: iced::font::Weight::Semibold,
            ..Default::default()
        }))
        .center_x(Length::Fill),
        button(text("\u{25B6}").size(14))
            .padding([4, 10])
            .style(ghost_button_style)
            .on_press_maybe(picker.grid.can_advance.then_some(Message::PickerNextMonth)),
    ]
    .align_y(iced::Alignment::Center);

    let weekdays = WEEKDAYS.iter().fold(Row::new(), |days, label| {
        days.push(
            container(secondary(label))
                .width(Length::Fixed(DAY_SIZE))
                .center_x(Length::Fixed(DAY_SIZE)),
        )
    });

    let weeks = picker.grid.weeks.iter().fold(Column::new().spacing(4), |weeks, week| {
        weeks.push(
            week.iter()
                .fold(Row::new(), |days, day| days.push(view_day(day))),
        )
    });

    let mut body = column![nav, weekdays, weeks].spacing(8);

    if !picker.unplaced.is_empty() {
        let others = picker.unplaced.iter().fold(Row::new().spacing(6), |chips, token| {
            let label = if token.is_blank() {
                "(vide)".to_string()
            } else {
                token.to_string()
            };
            chips.push(
                button(text(label).size(12))
                    .padding([4, 10])
                    .style(chip_button_style(false))
                    .on_press(Message::PickToken((*token).clone())),
            )
        });
        body = body.push(secondary("Dates non reconnues")).push(others.wrap());
    }

    dialog("Choisir une date", body.into())
}

fn view_day(day: &CalendarDay) -> Element<'static, Message> {
    if !day.in_month {
        return iced::widget::Space::new()
            .width(Length::Fixed(DAY_SIZE))
            .height(Length::Fixed(DAY_SIZE))
            .into();
    }

    button(
        container(text(day.date.day().to_string()).size(13))
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fixed(DAY_SIZE))
    .height(Length::Fixed(DAY_SIZE))
    .padding(0)
    .style(calendar_day_style(day.selected))
    .on_press_maybe(day.is_pickable().then_some(Message::PickDay(day.date)))
    .into()
}

fn dialog(title: &str, body: Element<'static, Message>) -> Element<'static, Message> {
    let close_btn = button(text("Fermer").size(13))
        .padding([8, 16])
        .style(primary_button_style)
        .on_press(Message::CloseDialog);

    container(
        column![
            text(title.to_string()).size(18).font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            }),
            body,
            container(close_btn).align_right(Length::Fill),
        ]
        .spacing(16),
    )
    .padding(20)
    .max_width(640.0)
    .style(dialog_style)
    .into()
}

fn field(label: &str, value: &str) -> Element<'static, Message> {
    row![
        container(secondary(label)).width(Length::Fixed(180.0)),
        text(value.to_string()).size(13),
    ]
    .spacing(8)
    .into()
}

fn json_block(json: String) -> Element<'static, Message> {
    container(
        scrollable(text(json).size(11).font(iced::Font::MONOSPACE))
            .height(Length::Shrink)
            .style(scrollable_style),
    )
    .padding(8)
    .width(Length::Fill)
    .max_height(320.0)
    .style(code_block_style)
    .into()
}

fn secondary(label: &str) -> iced::widget::Text<'static> {
    text(label.to_string()).size(12).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_secondary),
        }
    })
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
