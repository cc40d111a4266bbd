//! Step 1: country list and the numbers available in it

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::chrome::{banner, row_style, Help};
use crate::cli::tui::signup::state::{NumberFocus, NumberScreen};
use crate::cli::tui::signup::theme::Theme;
use crate::wizard::forms::Loadable;

pub fn render(frame: &mut Frame, area: Rect, state: &NumberScreen, theme: &Theme, spinner: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(30)])
        .split(area);

    render_countries(frame, chunks[0], state, theme, spinner);
    render_numbers(frame, chunks[1], state, theme, spinner);
}

fn render_countries(frame: &mut Frame, area: Rect, state: &NumberScreen, theme: &Theme, spinner: &str) {
    let focused = state.focus == NumberFocus::Countries;
    let mut lines = Vec::new();

    match &state.form.countries {
        Loadable::Idle | Loadable::Loading => {
            lines.push(Line::from(Span::styled(format!(" {} Loading…", spinner), theme.muted)));
        }
        Loadable::Failed(message) => {
            lines.push(banner(message, theme));
            lines.push(Line::from(Span::styled(" r to retry", theme.muted)));
        }
        Loadable::Ready(countries) => {
            for (i, country) in countries.iter().enumerate() {
                let chosen = state.form.country.as_deref() == Some(country.code.as_str());
                let marker = if chosen { "●" } else { " " };
                let cursor = focused && i == state.country_cursor;
                lines.push(Line::from(vec![
                    Span::raw(if cursor { "▶ " } else { "  " }),
                    Span::styled(format!("{} {}", marker, country.name), row_style(cursor, theme)),
                ]));
            }
        }
    }

    if let Some(error) = state.form.country_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!(" {}", error), theme.error)));
    }

    let block = Block::default()
        .title(" Country ")
        .borders(Borders::ALL)
        .border_style(theme.border(focused));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_numbers(frame: &mut Frame, area: Rect, state: &NumberScreen, theme: &Theme, spinner: &str) {
    let focused = state.focus == NumberFocus::Numbers;
    let mut lines = Vec::new();

    if state.form.country.is_none() {
        lines.push(Line::from(Span::styled(
            " Select a country to see available numbers.",
            theme.muted,
        )));
    } else {
        match &state.form.numbers {
            Loadable::Idle | Loadable::Loading => {
                lines.push(Line::from(Span::styled(
                    format!(" {} Checking availability…", spinner),
                    theme.muted,
                )));
            }
            Loadable::Failed(message) => {
                lines.push(banner(message, theme));
                lines.push(Line::from(Span::styled(" r to retry", theme.muted)));
            }
            Loadable::Ready(numbers) => {
                for (i, number) in numbers.iter().enumerate() {
                    let cursor = focused && i == state.number_cursor;
                    let chosen = state.form.selected_number.as_deref() == Some(number.as_str());
                    let mut spans = vec![
                        Span::raw(if cursor { "▶ " } else { "  " }),
                        Span::styled(number.clone(), row_style(cursor, theme)),
                    ];
                    if chosen {
                        spans.push(Span::styled("  (current)", theme.muted));
                    }
                    lines.push(Line::from(spans));
                }
            }
        }
    }

    let block = Block::default()
        .title(" Numbers available ")
        .borders(Borders::ALL)
        .border_style(theme.border(focused));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn help(state: &NumberScreen) -> Help {
    let mut help = vec![("↑↓", "move"), ("Tab", "switch list")];
    match state.focus {
        NumberFocus::Countries => help.push(("Enter", "choose country")),
        NumberFocus::Numbers => help.push(("Enter", "take number")),
    }
    if state.form.countries.error().is_some() || state.form.numbers.error().is_some() {
        help.push(("r", "retry"));
    }
    help.push(("q", "quit"));
    help
}
