use ratatui::style::{Color, Modifier, Style};

use studybot_core::dashboard::AlertKind;

// Color palette
pub const PRIMARY: Color = Color::Rgb(64, 128, 192);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn counter_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub fn alert_style(kind: AlertKind) -> Style {
    match kind {
        AlertKind::Success => success_style(),
        AlertKind::Danger => error_style(),
    }
}

pub fn tab_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Convert a chart color (`#rrggbb` or `rgba(r, g, b, a)`) to a terminal color.
/// Alpha is ignored; unparseable colors fall back to white.
pub fn css_color(color: Option<&str>) -> Color {
    color.and_then(parse_css_color).unwrap_or(Color::White)
}

fn parse_css_color(color: &str) -> Option<Color> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    let inner = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>().ok());
    Some(Color::Rgb(parts.next()??, parts.next()??, parts.next()??))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_color_hex() {
        assert_eq!(css_color(Some("#4caf50")), Color::Rgb(76, 175, 80));
        assert_eq!(css_color(Some("#fff")), Color::White);
        assert_eq!(css_color(None), Color::White);
    }

    #[test]
    fn test_css_color_rgba() {
        assert_eq!(css_color(Some("rgba(156, 39, 176, 0.7)")), Color::Rgb(156, 39, 176));
        assert_eq!(css_color(Some("rgb(1,2,3)")), Color::Rgb(1, 2, 3));
        assert_eq!(css_color(Some("rgba(nope)")), Color::White);
    }
}
