//! Step 5: activation summary

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::chrome::{centered_rect, Help};
use crate::cli::tui::signup::theme::Theme;
use crate::wizard::Confirmation;

pub fn render(frame: &mut Frame, area: Rect, confirmation: &Confirmation<'_>, theme: &Theme) {
    let card_area = centered_rect(60, 10, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Activated", theme.success)),
        Line::from(""),
        Line::from(Span::styled("YOUR NUMBER", theme.muted)),
        Line::from(Span::styled(
            confirmation.number.to_string(),
            theme.highlight.add_modifier(Modifier::BOLD),
        )),
        Line::from(confirmation.plan_line()),
        Line::from(Span::styled(
            format!("Txn: {}", confirmation.transaction_id),
            theme.muted,
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.success);
    let card = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(card, card_area);
}

pub fn help() -> Help {
    vec![("Enter", "start over"), ("q", "quit")]
}
