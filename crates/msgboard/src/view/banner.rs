//! Persistent connection failure banner.

use iced::widget::{button, column, container, row, text};
use iced::{Element, Length};

use msgboard_core::dashboard::Banner;

use crate::message::Message;
use crate::style::widgets::{banner_style, palette, primary_button_style};

/// Renders the banner shown when the initial load failed.
pub fn view_banner(banner: &Banner, api_url: &str) -> Element<'static, Message> {
    let headline = text(format!(
        "Impossible de se connecter à l'API. Vérifiez que le serveur est en cours d'exécution sur {api_url}."
    ))
    .size(14)
    .font(iced::Font {
        weight: iced::font::Weight::Semibold,
        ..Default::default()
    });

    let detail = text(banner.detail.clone()).size(12).style(|_theme| {
        let p = palette::current();
        text::Style {
            color: Some(p.text_secondary),
        }
    });

    let retry_btn = button(
        text(if banner.retrying {
            "Connexion..."
        } else {
            "Réessayer"
        })
        .size(13),
    )
    .padding([8, 16])
    .style(primary_button_style)
    .on_press_maybe((!banner.retrying).then_some(Message::RetryConnection));

    container(
        row![
            text("\u{26A0}").size(22).style(|_theme| {
                let p = palette::current();
                text::Style {
                    color: Some(p.accent_red),
                }
            }),
            column![headline, detail].spacing(4).width(Length::Fill),
            retry_btn,
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(banner_style)
    .into()
}
