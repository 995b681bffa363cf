//! Shared palette.

use ratatui::style::{Color, Modifier, Style};

pub const BG_BASE: Color = Color::Rgb(16, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(26, 30, 44);
pub const BG_INPUT: Color = Color::Rgb(44, 48, 64);
pub const BG_HIGHLIGHT: Color = Color::Rgb(120, 32, 40);
pub const TEXT_MAIN: Color = Color::Rgb(236, 238, 244);
pub const TEXT_DIM: Color = Color::Rgb(150, 156, 176);
pub const ACCENT_RED: Color = Color::Rgb(232, 72, 72);
pub const ACCENT_GOLD: Color = Color::Rgb(240, 196, 72);
pub const ACCENT_GREEN: Color = Color::Rgb(96, 200, 120);

pub fn focus_border(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

pub fn type_color(name: &str) -> Color {
    match name {
        "normal" => Color::Rgb(168, 168, 120),
        "fire" => Color::Rgb(240, 128, 48),
        "water" => Color::Rgb(104, 144, 240),
        "electric" => Color::Rgb(248, 208, 48),
        "grass" => Color::Rgb(120, 200, 80),
        "ice" => Color::Rgb(152, 216, 216),
        "fighting" => Color::Rgb(192, 48, 40),
        "poison" => Color::Rgb(160, 64, 160),
        "ground" => Color::Rgb(224, 192, 104),
        "flying" => Color::Rgb(168, 144, 240),
        "psychic" => Color::Rgb(248, 88, 136),
        "bug" => Color::Rgb(168, 184, 32),
        "rock" => Color::Rgb(184, 160, 56),
        "ghost" => Color::Rgb(112, 88, 152),
        "dragon" => Color::Rgb(112, 56, 248),
        "dark" => Color::Rgb(112, 88, 72),
        "steel" => Color::Rgb(184, 184, 208),
        "fairy" => Color::Rgb(238, 153, 172),
        _ => TEXT_DIM,
    }
}

pub fn type_badge_style(name: &str) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(type_color(name))
        .add_modifier(Modifier::BOLD)
}
