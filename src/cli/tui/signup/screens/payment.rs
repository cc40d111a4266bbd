//! Step 4: card details and the amount due

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::chrome::{banner, Help};
use crate::cli::tui::signup::state::PaymentScreen;
use crate::cli::tui::signup::theme::Theme;
use crate::wizard::forms::PaymentField;

pub fn render(frame: &mut Frame, area: Rect, state: &PaymentScreen, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Amount due
            Constraint::Length(3), // Name on card
            Constraint::Length(3), // Card number
            Constraint::Length(3), // Expiry + CVC
            Constraint::Length(1), // Hint
            Constraint::Length(1), // Pay
            Constraint::Length(1), // Banner
            Constraint::Min(0),
        ])
        .split(area);

    let amount = Line::from(vec![
        Span::raw(" Amount due: "),
        Span::styled(state.form.amount().fixed(), theme.highlight),
    ]);
    frame.render_widget(Paragraph::new(amount), chunks[0]);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);

    let areas = [chunks[1], chunks[2], row[0], row[1]];
    let focused = state.focused_field();
    for (field, area) in PaymentField::ALL.iter().zip(areas) {
        render_field(frame, area, state, *field, focused == *field, theme);
    }

    if let Some(hint) = state.form.hint() {
        let hint = Line::from(Span::styled(format!(" {}", hint), theme.muted));
        frame.render_widget(Paragraph::new(hint), chunks[4]);
    }

    let pay_style = if state.form.can_submit() {
        theme.success
    } else {
        theme.muted
    };
    let pay = Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("[ {} ]", state.form.pay_label()), pay_style),
    ]);
    frame.render_widget(Paragraph::new(pay), chunks[5]);

    if let Some(error) = state.form.error() {
        frame.render_widget(Paragraph::new(banner(error, theme)), chunks[6]);
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    state: &PaymentScreen,
    field: PaymentField,
    focused: bool,
    theme: &Theme,
) {
    let value = state.inputs.get(&field).map(|i| i.value()).unwrap_or_default();
    let text = if value.is_empty() && !field.placeholder().is_empty() {
        Line::from(Span::styled(field.placeholder(), theme.muted))
    } else {
        Line::from(value.to_string())
    };

    let error = state.form.visible_error(field);
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
        if let Some(input) = state.inputs.get(&field) {
            frame.set_cursor_position((area.x + 1 + input.visual_cursor() as u16, area.y + 1));
        }
    }
}

pub fn help() -> Help {
    vec![
        ("Tab/↑↓", "field"),
        ("Enter", "pay"),
        ("Esc", "back"),
        ("Ctrl+C×2", "quit"),
    ]
}
