use ratatui::style::{Color, Modifier, Style};

use crate::ui::charts::ChartStyle;

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Transcript styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub bot_text_style: Style,
    pub error_text_style: Style,
    pub placeholder_style: Style,

    // Chrome
    pub title_style: Style,
    pub notice_style: Style,
    pub loading_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,

    pub chart: ChartStyle,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            bot_text_style: Style::default().fg(Color::White),
            error_text_style: Style::default().fg(Color::LightRed),
            placeholder_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),

            title_style: Style::default().fg(Color::Gray),
            notice_style: Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
            loading_indicator_style: Style::default().fg(Color::White),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),

            chart: ChartStyle {
                frame_style: Style::default().fg(Color::DarkGray),
                axis_style: Style::default().fg(Color::Gray),
                label_style: Style::default().fg(Color::White),
                ..ChartStyle::default()
            },
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            bot_text_style: Style::default().fg(Color::Black),
            error_text_style: Style::default().fg(Color::Red),
            placeholder_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),

            title_style: Style::default().fg(Color::DarkGray),
            notice_style: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            loading_indicator_style: Style::default().fg(Color::Black),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),

            chart: ChartStyle {
                frame_style: Style::default().fg(Color::Gray),
                axis_style: Style::default().fg(Color::DarkGray),
                label_style: Style::default().fg(Color::Black),
                ..ChartStyle::default()
            },
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    pub fn is_known(name: &str) -> bool {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "dark" | "default" | "light"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_case_insensitive_with_dark_fallback() {
        assert_eq!(Theme::from_name("LIGHT").background_color, Color::White);
        assert_eq!(Theme::from_name("solarized").background_color, Color::Black);
    }

    #[test]
    fn known_names() {
        assert!(Theme::is_known("dark"));
        assert!(Theme::is_known("Light"));
        assert!(!Theme::is_known("dracula"));
    }
}
