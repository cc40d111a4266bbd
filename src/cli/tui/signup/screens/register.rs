//! Step 3: account details

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::Input;

use super::chrome::{banner, Help};
use crate::cli::tui::signup::state::RegisterScreen;
use crate::cli::tui::signup::theme::Theme;
use crate::wizard::forms::RegisterField;

pub fn render(frame: &mut Frame, area: Rect, state: &RegisterScreen, theme: &Theme) {
    let mut constraints: Vec<Constraint> = RegisterField::ALL
        .iter()
        .map(|f| match f {
            RegisterField::Consent => Constraint::Length(2),
            _ => Constraint::Length(3),
        })
        .collect();
    constraints.push(Constraint::Length(1)); // Submit
    constraints.push(Constraint::Length(1)); // Banner
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let focused = state.focused_field();
    for (i, field) in RegisterField::ALL.iter().enumerate() {
        let error = state.form.visible_error(*field);
        if *field == RegisterField::Consent {
            render_consent(frame, chunks[i], state.form.consent, focused == *field, error, theme);
        } else if let Some(input) = state.inputs.get(field) {
            render_field(frame, chunks[i], *field, input, focused == *field, error, theme);
        }
    }

    let n = RegisterField::ALL.len();
    let submit_style = if state.form.can_submit() {
        theme.success
    } else {
        theme.muted
    };
    let submit = Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("[ {} ]", state.form.submit_label()), submit_style),
    ]);
    frame.render_widget(Paragraph::new(submit), chunks[n]);

    if let Some(error) = state.form.error() {
        frame.render_widget(Paragraph::new(banner(error, theme)), chunks[n + 1]);
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    field: RegisterField,
    input: &Input,
    focused: bool,
    error: Option<&str>,
    theme: &Theme,
) {
    let shown = if field.is_secret() {
        "•".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };
    let text = if shown.is_empty() && field == RegisterField::Password {
        Line::from(Span::styled("At least 8 characters", theme.muted))
    } else {
        Line::from(shown)
    };

    let mut block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(if error.is_some() {
            theme.error
        } else {
            theme.border(focused)
        });
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(format!(" {} ", error), theme.error)));
    }
    frame.render_widget(Paragraph::new(text).block(block), area);

    if focused {
        frame.set_cursor_position((area.x + 1 + input.visual_cursor() as u16, area.y + 1));
    }
}

fn render_consent(
    frame: &mut Frame,
    area: Rect,
    checked: bool,
    focused: bool,
    error: Option<&str>,
    theme: &Theme,
) {
    let box_style = if focused { theme.focused } else { theme.highlight };
    let mut lines = vec![Line::from(vec![
        Span::raw(" "),
        Span::styled(if checked { "[x]" } else { "[ ]" }, box_style),
        Span::raw(" "),
        Span::raw(RegisterField::Consent.label()),
    ])];
    if let Some(error) = error {
        lines.push(Line::from(Span::styled(format!("     {}", error), theme.error)));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn help() -> Help {
    vec![
        ("Tab/↑↓", "field"),
        ("Space", "agree"),
        ("Enter", "continue"),
        ("Esc", "back"),
        ("Ctrl+C×2", "quit"),
    ]
}
