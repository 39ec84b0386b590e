//! Button style functions.

use iced::widget::button;
use iced::{Background, Border, Color};

use super::palette;
use super::shadows;
use super::shadows::radius;

/// Primary action button.
pub fn primary_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(p.primary)),
        text_color: p.text_on_primary,
        border: Border {
            color: p.primary,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::subtle(),
        snap: false,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(p.primary_light)),
            border: Border {
                color: p.primary_light,
                ..base.border
            },
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(p.primary_dark)),
            shadow: shadows::none(),
            ..base
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(p.text_muted)),
            border: Border {
                color: p.text_muted,
                ..base.border
            },
            text_color: p.surface,
            shadow: shadows::none(),
            ..base
        },
    }
}

/// Outlined toolbar button.
pub fn toolbar_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(p.surface)),
        text_color: p.primary,
        border: Border {
            color: p.border_medium,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(p.hover)),
            border: Border {
                color: p.primary,
                ..base.border
            },
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(p.selected)),
            ..base
        },
        button::Status::Disabled => button::Style {
            text_color: p.text_muted,
            border: Border {
                color: p.border_subtle,
                ..base.border
            },
            ..base
        },
    }
}

/// Borderless icon button.
pub fn ghost_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let p = palette::current();

    let base = button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        text_color: p.text_secondary,
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: radius::MEDIUM.into(),
        },
        shadow: shadows::none(),
        snap: false,
    };

    match status {
        button::Status::Active => base,
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(p.hover)),
            text_color: p.text_primary,
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(p.selected)),
            ..base
        },
        button::Status::Disabled => button::Style {
            text_color: p.text_muted,
            ..base
        },
    }
}

/// Pill-shaped filter chip.
pub fn chip_button_style(
    selected: bool,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let p = palette::current();
        let (background, text_color, border_color) = if selected {
            (p.primary, p.text_on_primary, p.primary)
        } else {
            match status {
                button::Status::Hovered | button::Status::Pressed => {
                    (p.hover, p.text_primary, p.border_medium)
                }
                button::Status::Active => (p.surface, p.text_secondary, p.border_subtle),
                button::Status::Disabled => (p.surface, p.text_muted, p.border_subtle),
            }
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                color: border_color,
                width: 1.0,
                radius: radius::PILL.into(),
            },
            shadow: shadows::none(),
            snap: false,
        }
    }
}

/// Day cell of the date picker.
pub fn calendar_day_style(
    selected: bool,
) -> impl Fn(&iced::Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let p = palette::current();
        let (background, text_color, border_color) = match (selected, status) {
            (true, _) => (p.primary, p.text_on_primary, p.primary),
            (false, button::Status::Disabled) => {
                (Color::TRANSPARENT, p.text_muted, Color::TRANSPARENT)
            }
            (false, button::Status::Hovered | button::Status::Pressed) => {
                (p.hover, p.primary, p.primary)
            }
            (false, button::Status::Active) => (p.selected, p.primary, p.primary_light),
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                color: border_color,
                width: 1.0,
                radius: radius::PILL.into(),
            },
            shadow: shadows::none(),
            snap: false,
        }
    }
}
