use ratatui::style::{Color, Modifier, Style};

/// Consistent theme for the TUI
pub struct Theme {
    pub brand: Style,
    pub selected: Style,
    pub focused: Style,
    pub error: Style,
    pub success: Style,
    pub muted: Style,
    pub highlight: Style,
    pub badge: Style,
    pub help_bar: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            brand: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .bg(Color::Rgb(50, 50, 80))
                .add_modifier(Modifier::BOLD),
            focused: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            success: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            highlight: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            badge: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            help_bar: Style::default().bg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Border style for a pane, brighter when it has focus
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        }
    }

    /// Spinner glyph for the given tick
    pub fn spinner(tick: u64) -> &'static str {
        const FRAMES: [&str; 4] = ["⠋", "⠙", "⠸", "⠴"];
        FRAMES[(tick % FRAMES.len() as u64) as usize]
    }
}
