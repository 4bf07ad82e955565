use ratatui::style::Color;

/// Visual theme for the chat surface. Purely cosmetic: toggling it has no
/// effect on the conversation or the exchange state.
///
/// The palettes mirror the MotorMatch IA web colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Page background behind every panel.
    pub fn page_bg(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(0x1e, 0x1e, 0x1e),
            Theme::Light => Color::Rgb(0xf8, 0xf9, 0xfa),
        }
    }

    /// Background of the scrolling message thread.
    pub fn thread_bg(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(0x20, 0x20, 0x20),
            Theme::Light => Color::Rgb(0xf1, 0xf1, 0xf1),
        }
    }

    pub fn text(self) -> Color {
        match self {
            Theme::Dark => Color::White,
            Theme::Light => Color::Black,
        }
    }

    pub fn muted(self) -> Color {
        match self {
            Theme::Dark => Color::DarkGray,
            Theme::Light => Color::Gray,
        }
    }

    /// Bubble chip behind the user's role label.
    pub fn user_bubble(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(0x0d, 0x6e, 0xfd),
            Theme::Light => Color::Rgb(0x00, 0x7b, 0xff),
        }
    }

    /// Text on the user bubble chip (white in both palettes, as on the web).
    pub fn user_bubble_text(self) -> Color {
        Color::White
    }

    /// Bubble chip behind the advisor's role label.
    pub fn assistant_bubble(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(0x34, 0x3a, 0x40),
            Theme::Light => Color::Rgb(0xe9, 0xec, 0xef),
        }
    }

    pub fn assistant_bubble_text(self) -> Color {
        match self {
            Theme::Dark => Color::White,
            Theme::Light => Color::Black,
        }
    }

    /// Background of the input field.
    pub fn input_bg(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(0x34, 0x3a, 0x40),
            Theme::Light => Color::Rgb(0xde, 0xe2, 0xe6),
        }
    }

    /// The send-button green, used for the header title and focus borders.
    pub fn accent(self) -> Color {
        Color::Rgb(0x19, 0x87, 0x54)
    }

    /// Icon shown in the header for the state the toggle switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "🌙",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_alternates_between_both_themes() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ_where_it_matters() {
        assert_ne!(Theme::Dark.page_bg(), Theme::Light.page_bg());
        assert_ne!(Theme::Dark.text(), Theme::Light.text());
        assert_ne!(Theme::Dark.input_bg(), Theme::Light.input_bg());
        // The accent is shared between both palettes.
        assert_eq!(Theme::Dark.accent(), Theme::Light.accent());
    }
}
