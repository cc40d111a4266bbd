//! Header, stepper and help bar shared by every step

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::cli::tui::signup::theme::Theme;
use crate::wizard::Step;

/// Key hint shown in the help bar
pub type Help = Vec<(&'static str, &'static str)>;

pub fn render_header(frame: &mut Frame, area: Rect, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(20)])
        .split(area);

    let brand = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled("COOEE", theme.brand),
        Span::styled("  get a number", theme.muted),
    ]));
    frame.render_widget(brand, chunks[0]);

    let home = Paragraph::new(Line::from(vec![
        Span::styled("Ctrl+R", theme.highlight),
        Span::styled(" home ", theme.muted),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(home, chunks[1]);
}

/// `✓ Number · ✓ Plan · Register · Payment · Done` with the active step lit
pub fn render_stepper(frame: &mut Frame, area: Rect, current: Step, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    for (i, step) in Step::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", theme.muted));
        }
        if *step < current {
            spans.push(Span::styled(format!("✓ {}", step.label()), theme.success));
        } else if *step == current {
            spans.push(Span::styled(
                format!("{} {}", step.index(), step.label()),
                theme.focused.add_modifier(Modifier::UNDERLINED),
            ));
        } else {
            spans.push(Span::styled(
                format!("{} {}", step.index(), step.label()),
                theme.muted,
            ));
        }
    }

    let stepper = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.muted)
            .title(format!(" Step {} of {} · {} ", current.index(), Step::ALL.len(), current.title())),
    );
    frame.render_widget(stepper, area);
}

pub fn render_help_bar(frame: &mut Frame, area: Rect, help: &Help, quit_armed: bool, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];
    if quit_armed {
        spans.push(Span::styled("Press Ctrl+C again to quit", theme.error));
    } else {
        for (i, (key, what)) in help.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" • "));
            }
            spans.push(Span::styled(*key, theme.highlight));
            spans.push(Span::raw(format!(" {}", what)));
        }
    }

    let bar = Paragraph::new(Line::from(spans)).style(theme.help_bar);
    frame.render_widget(bar, area);
}

/// Red banner line for a provider failure
pub fn banner(message: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(format!(" ✗ {}", message), theme.error))
}

/// Calculate centered area
pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Style for a list row under the cursor
pub fn row_style(active: bool, theme: &Theme) -> Style {
    if active {
        theme.selected
    } else {
        Style::default()
    }
}
