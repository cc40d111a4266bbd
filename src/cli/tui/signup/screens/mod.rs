//! Screen rendering, one module per wizard step plus the shared chrome

pub mod chrome;
pub mod confirmation;
pub mod number;
pub mod payment;
pub mod plan;
pub mod register;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::app::App;
use super::state::ScreenState;
use super::theme::Theme;

/// Header, stepper, the current step's body and the help bar
pub fn render(frame: &mut Frame, app: &App, theme: &Theme, spinner: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Brand header
            Constraint::Length(3), // Stepper
            Constraint::Min(0),    // Step body
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let controller = app.controller();
    chrome::render_header(frame, chunks[0], theme);
    chrome::render_stepper(frame, chunks[1], controller.current_step(), theme);

    let help = match app.screen() {
        ScreenState::Number(state) => {
            number::render(frame, chunks[2], state, theme, spinner);
            number::help(state)
        }
        ScreenState::Plan(state) => {
            plan::render(frame, chunks[2], state, theme, spinner);
            plan::help(state)
        }
        ScreenState::Register(state) => {
            register::render(frame, chunks[2], state, theme);
            register::help()
        }
        ScreenState::Payment(state) => {
            payment::render(frame, chunks[2], state, theme);
            payment::help()
        }
        ScreenState::Confirmation => {
            if let Some(confirmation) = controller.confirmation() {
                confirmation::render(frame, chunks[2], &confirmation, theme);
            }
            confirmation::help()
        }
    };

    chrome::render_help_bar(frame, chunks[3], &help, app.quit_armed(), theme);
}
