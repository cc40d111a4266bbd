//! Step 2: plan cards

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::chrome::{banner, Help};
use crate::cli::tui::signup::state::PlanScreen;
use crate::cli::tui::signup::theme::Theme;
use crate::wizard::forms::Loadable;
use crate::wizard::Plan;

pub fn render(frame: &mut Frame, area: Rect, state: &PlanScreen, theme: &Theme, spinner: &str) {
    let plans = match &state.form.plans {
        Loadable::Ready(plans) => plans,
        Loadable::Failed(message) => {
            let lines = vec![banner(message, theme), Line::from(Span::styled(" r to retry", theme.muted))];
            frame.render_widget(Paragraph::new(lines), area);
            return;
        }
        Loadable::Idle | Loadable::Loading => {
            let loading = Line::from(Span::styled(format!(" {} Loading plans…", spinner), theme.muted));
            frame.render_widget(Paragraph::new(loading), area);
            return;
        }
    };
    if plans.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, plans.len() as u32); plans.len()];
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, plan) in plans.iter().enumerate() {
        let current = state.form.selected_id.as_deref() == Some(plan.id.as_str());
        render_card(frame, cards[i], plan, i == state.cursor, current, theme);
    }
}

fn render_card(frame: &mut Frame, area: Rect, plan: &Plan, cursor: bool, current: bool, theme: &Theme) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(plan.name.to_uppercase(), theme.highlight.add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format!(" {}/mo ", plan.price), theme.badge),
        ]),
        Line::from(""),
    ];
    for feature in &plan.features {
        lines.push(Line::from(format!("• {}", feature)));
    }
    if current {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Current plan", theme.muted)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(cursor));
    let card = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

pub fn help(state: &PlanScreen) -> Help {
    let mut help = vec![("←→", "move"), ("Enter", "choose plan"), ("Esc", "back")];
    if state.form.plans.error().is_some() {
        help.push(("r", "retry"));
    }
    help.push(("q", "quit"));
    help
}
