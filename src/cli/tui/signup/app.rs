use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal, Frame,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time;
use tracing::{debug, error, info, warn};
use tui_input::backend::crossterm::EventHandler;

use super::events::{Action, AppEvent};
use super::state::*;
use super::theme::Theme;
use crate::config::CooeeConfig;
use crate::providers::{ActionProvider, CatalogProvider, MockProvider};
use crate::wizard::forms::RegisterField;
use crate::wizard::{StepResult, WizardController};
use crate::Result;

/// Window in which a second Ctrl+C quits
const CTRL_C_WINDOW: Duration = Duration::from_millis(1000);

/// Main application struct
pub struct App {
    /// Owner of the wizard state
    controller: WizardController,
    /// Screen for the current step
    screen: ScreenState,
    provider: Arc<MockProvider>,
    tick_rate: Duration,
    /// Whether the app should quit
    should_quit: bool,
    theme: Theme,
    /// Event sender for background tasks
    event_tx: UnboundedSender<AppEvent>,
    event_rx: UnboundedReceiver<AppEvent>,
    /// Last issued provider request id
    last_request: u64,
    /// Spinner frame counter
    ticks: u64,
    /// Last time Ctrl+C was pressed
    last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new app instance. Call [`App::mount`] before feeding events.
    pub fn new(config: &CooeeConfig) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            controller: WizardController::new(),
            screen: ScreenState::Number(NumberScreen::default()),
            provider: Arc::new(MockProvider::new(config.providers.clone())),
            tick_rate: config.ui.tick_rate(),
            should_quit: false,
            theme: Theme::default(),
            event_tx,
            event_rx,
            last_request: 0,
            ticks: 0,
            last_ctrl_c: None,
        }
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn screen(&self) -> &ScreenState {
        &self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// A first Ctrl+C was seen and a second one would quit
    pub fn quit_armed(&self) -> bool {
        self.last_ctrl_c
            .is_some_and(|last| last.elapsed() < CTRL_C_WINDOW)
    }

    /// Run the application
    pub async fn run(mut self) -> Result<()> {
        // Initialize terminal
        let mut terminal = ratatui::init();
        terminal.clear()?;

        // Input is read on a blocking thread and forwarded as events
        let input_tx = self.event_tx.clone();
        let poll_rate = self.tick_rate;
        tokio::task::spawn_blocking(move || {
            forward_input(&input_tx, || {
                if event::poll(poll_rate)? {
                    event::read().map(Some)
                } else {
                    Ok(None)
                }
            })
        });

        self.mount();
        info!("Signup wizard started");

        let result = self.main_loop(&mut terminal).await;

        // Cleanup
        ratatui::restore();
        info!(step = %self.controller.current_step(), "Signup wizard closed");
        self.event_rx.close();
        result
    }

    /// Main event loop
    async fn main_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            match time::timeout(self.tick_rate, self.event_rx.recv()).await {
                Ok(Some(event)) => self.update(event),
                Ok(None) => break, // Channel closed
                Err(_) => self.update(AppEvent::Tick),
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Next event from input or a provider task
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    /// Handle one event and carry out whatever it asks for
    pub fn update(&mut self, event: AppEvent) {
        if let Some(action) = self.handle_event(event) {
            self.perform(action);
        }
    }

    /// Start the provider calls the current screen needs
    pub fn mount(&mut self) {
        debug!(step = %self.screen.step(), "Mounting screen");
        let actions = match &self.screen {
            ScreenState::Number(screen) => {
                let mut actions = vec![Action::LoadCountries];
                // Returning with a stored selection re-offers its country's numbers
                if let Some(code) = screen.form.country.clone() {
                    actions.push(Action::LoadNumbers(code));
                }
                actions
            }
            ScreenState::Plan(_) => vec![Action::LoadPlans],
            _ => Vec::new(),
        };
        for action in actions {
            self.perform(action);
        }
    }

    /// Render the current state
    pub fn render(&self, frame: &mut Frame) {
        super::screens::render(frame, self, &self.theme, Theme::spinner(self.ticks));
    }

    /// Handle an event
    pub fn handle_event(&mut self, event: AppEvent) -> Option<Action> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(..) => None,
            AppEvent::Tick => {
                self.ticks = self.ticks.wrapping_add(1);
                None
            }
            AppEvent::CountriesLoaded { request, result } => match &mut self.screen {
                ScreenState::Number(s) if s.countries_request == Some(request) => {
                    s.countries_request = None;
                    s.form.countries_loaded(result);
                    s.sync_cursors();
                    None
                }
                _ => Self::stale("countries", request),
            },
            AppEvent::NumbersLoaded {
                request,
                country,
                result,
            } => match &mut self.screen {
                ScreenState::Number(s) if s.numbers_request == Some(request) => {
                    s.numbers_request = None;
                    if s.form.numbers_loaded(&country, result) {
                        s.sync_cursors();
                    }
                    None
                }
                _ => Self::stale("numbers", request),
            },
            AppEvent::PlansLoaded { request, result } => match &mut self.screen {
                ScreenState::Plan(s) if s.request == Some(request) => {
                    s.request = None;
                    s.form.plans_loaded(result);
                    s.sync_cursor();
                    None
                }
                _ => Self::stale("plans", request),
            },
            AppEvent::Registered { request, result } => match &mut self.screen {
                ScreenState::Register(s) if s.request == Some(request) => {
                    s.request = None;
                    s.form
                        .finish_submit(result)
                        .map(|user| Action::Advance(StepResult::Register(user)))
                }
                _ => Self::stale("registration", request),
            },
            AppEvent::Paid { request, result } => match &mut self.screen {
                ScreenState::Payment(s) if s.request == Some(request) => {
                    s.request = None;
                    let payment = s.form.finish_submit(result);
                    s.resync_inputs();
                    payment.map(|p| Action::Advance(StepResult::Payment(p)))
                }
                _ => Self::stale("payment", request),
            },
        }
    }

    fn stale(kind: &'static str, request: u64) -> Option<Action> {
        debug!(kind, request, "Discarding stale provider result");
        None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Handle global keys first
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => {
                    // Exit on double press
                    if self.quit_armed() {
                        return Some(Action::Quit);
                    }
                    self.last_ctrl_c = Some(Instant::now());
                    return None;
                }
                KeyCode::Char('r') => return Some(Action::Reset),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc if self.controller.can_retreat() && !self.screen.is_busy() => {
                return Some(Action::Back);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') if !self.screen.takes_text() => {
                return Some(Action::Quit);
            }
            _ => {}
        }

        // Route to screen-specific handler
        match &mut self.screen {
            ScreenState::Number(s) => Self::handle_number_key(s, key),
            ScreenState::Plan(s) => Self::handle_plan_key(s, key),
            ScreenState::Register(s) => Self::handle_register_key(s, key),
            ScreenState::Payment(s) => Self::handle_payment_key(s, key),
            ScreenState::Confirmation => match key.code {
                KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::Reset),
                _ => None,
            },
        }
    }

    fn handle_number_key(state: &mut NumberScreen, key: KeyEvent) -> Option<Action> {
        match (state.focus, key.code) {
            (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
                if state.focus == NumberFocus::Countries {
                    state.form.touch_country();
                    if state.form.country.is_some() {
                        state.focus = NumberFocus::Numbers;
                    }
                } else {
                    state.focus = NumberFocus::Countries;
                }
                None
            }
            (_, KeyCode::Char('r')) => {
                if state.form.countries.error().is_some() {
                    Some(Action::LoadCountries)
                } else if state.form.numbers.error().is_some() {
                    state.form.country.clone().map(Action::LoadNumbers)
                } else {
                    None
                }
            }
            (NumberFocus::Countries, KeyCode::Up) => {
                state.country_cursor = state.country_cursor.saturating_sub(1);
                None
            }
            (NumberFocus::Countries, KeyCode::Down) => {
                let len = state.form.countries.ready().map_or(0, Vec::len);
                if state.country_cursor + 1 < len {
                    state.country_cursor += 1;
                }
                None
            }
            (NumberFocus::Countries, KeyCode::Enter) => {
                let code = state.highlighted_country()?.to_string();
                state.focus = NumberFocus::Numbers;
                if state.form.select_country(&code) {
                    state.number_cursor = 0;
                    Some(Action::LoadNumbers(code))
                } else {
                    None
                }
            }
            (NumberFocus::Numbers, KeyCode::Up) => {
                state.number_cursor = state.number_cursor.saturating_sub(1);
                None
            }
            (NumberFocus::Numbers, KeyCode::Down) => {
                if state.number_cursor + 1 < state.form.available_numbers().len() {
                    state.number_cursor += 1;
                }
                None
            }
            (NumberFocus::Numbers, KeyCode::Enter) => state
                .form
                .choose_number(state.number_cursor)
                .map(|selection| Action::Advance(StepResult::Number(selection))),
            _ => None,
        }
    }

    fn handle_plan_key(state: &mut PlanScreen, key: KeyEvent) -> Option<Action> {
        let count = state.form.available_plans().len();
        match key.code {
            KeyCode::Left | KeyCode::Up => {
                state.cursor = state.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Down => {
                if state.cursor + 1 < count {
                    state.cursor += 1;
                }
                None
            }
            KeyCode::Enter => state
                .form
                .choose(state.cursor)
                .map(|plan| Action::Advance(StepResult::Plan(plan))),
            KeyCode::Char('r') if state.form.plans.error().is_some() => Some(Action::LoadPlans),
            _ => None,
        }
    }

    fn handle_register_key(state: &mut RegisterScreen, key: KeyEvent) -> Option<Action> {
        if state.form.is_submitting() {
            return None;
        }
        let field = state.focused_field();
        match key.code {
            KeyCode::Tab | KeyCode::Down => state.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => state.move_focus(false),
            KeyCode::Enter => {
                state.form.touch(field);
                return state.form.begin_submit().map(Action::Register);
            }
            KeyCode::Char(' ') if field == RegisterField::Consent => state.form.toggle_consent(),
            _ => {
                if let Some(input) = state.inputs.get_mut(&field) {
                    input.handle_event(&Event::Key(key));
                    state.form.set_value(field, input.value());
                }
            }
        }
        None
    }

    fn handle_payment_key(state: &mut PaymentScreen, key: KeyEvent) -> Option<Action> {
        if state.form.is_submitting() {
            return None;
        }
        let field = state.focused_field();
        match key.code {
            KeyCode::Tab | KeyCode::Down => state.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => state.move_focus(false),
            KeyCode::Enter => {
                state.form.touch(field);
                return state.form.begin_submit().map(Action::Pay);
            }
            _ => {
                if let Some(input) = state.inputs.get_mut(&field) {
                    input.handle_event(&Event::Key(key));
                    let raw = input.value().to_string();
                    state.form.set_value(field, &raw);
                    state.resync_inputs();
                }
            }
        }
        None
    }

    /// Carry out an action
    pub fn perform(&mut self, action: Action) {
        match action {
            Action::Advance(result) => match self.controller.advance(result) {
                Ok(step) => {
                    info!(step = %step, "Advanced");
                    self.remount();
                }
                Err(e) => warn!(error = %e, "Step result rejected"),
            },
            Action::Back => match self.controller.retreat() {
                Ok(step) => {
                    info!(step = %step, "Went back");
                    self.remount();
                }
                Err(e) => warn!(error = %e, "Cannot go back"),
            },
            Action::Reset => {
                info!("Starting over");
                self.controller.reset();
                self.remount();
            }
            Action::Quit => self.should_quit = true,
            Action::LoadCountries => {
                let request = self.next_request();
                if let ScreenState::Number(s) = &mut self.screen {
                    s.form.begin_countries();
                    s.countries_request = Some(request);
                }
                let provider = Arc::clone(&self.provider);
                self.spawn(async move {
                    let result = provider.fetch_countries().await;
                    AppEvent::CountriesLoaded { request, result }
                });
            }
            Action::LoadNumbers(country) => {
                let request = self.next_request();
                if let ScreenState::Number(s) = &mut self.screen {
                    s.form.begin_numbers();
                    s.numbers_request = Some(request);
                }
                let provider = Arc::clone(&self.provider);
                self.spawn(async move {
                    let result = provider.fetch_numbers_by_country(&country).await;
                    AppEvent::NumbersLoaded {
                        request,
                        country,
                        result,
                    }
                });
            }
            Action::LoadPlans => {
                let request = self.next_request();
                if let ScreenState::Plan(s) = &mut self.screen {
                    s.form.begin_load();
                    s.request = Some(request);
                }
                let provider = Arc::clone(&self.provider);
                self.spawn(async move {
                    let result = provider.fetch_plans().await;
                    AppEvent::PlansLoaded { request, result }
                });
            }
            Action::Register(draft) => {
                let request = self.next_request();
                if let ScreenState::Register(s) = &mut self.screen {
                    s.request = Some(request);
                }
                let provider = Arc::clone(&self.provider);
                self.spawn(async move {
                    let result = provider.register(&draft).await;
                    AppEvent::Registered { request, result }
                });
            }
            Action::Pay(amount) => {
                let request = self.next_request();
                if let ScreenState::Payment(s) = &mut self.screen {
                    s.request = Some(request);
                }
                let provider = Arc::clone(&self.provider);
                self.spawn(async move {
                    let result = provider.pay(amount).await;
                    AppEvent::Paid { request, result }
                });
            }
        }
    }

    fn next_request(&mut self) -> u64 {
        self.last_request += 1;
        self.last_request
    }

    /// Run a provider call on a task and post its event back
    fn spawn<F>(&self, task: F)
    where
        F: std::future::Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    /// Swap in the screen for the controller's step; old requests go stale
    fn remount(&mut self) {
        let screen = self
            .controller
            .current_view()
            .map(|view| ScreenState::from_view(&view));
        self.screen = match screen {
            Some(screen) => screen,
            None => {
                error!(step = %self.controller.current_step(), "No view for current step, starting over");
                self.controller.reset();
                ScreenState::Number(NumberScreen::default())
            }
        };
        self.mount();
    }
}

/// Forward terminal input until the receiver is closed or reading fails.
///
/// `next` returns `Ok(None)` when no event arrived within its poll window, so
/// a closed channel is noticed even while the terminal is idle.
pub fn forward_input<F>(tx: &UnboundedSender<AppEvent>, mut next: F)
where
    F: FnMut() -> std::io::Result<Option<Event>>,
{
    while !tx.is_closed() {
        let sent = match next() {
            Ok(Some(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                tx.send(AppEvent::Key(key))
            }
            Ok(Some(Event::Resize(width, height))) => tx.send(AppEvent::Resize(width, height)),
            Ok(_) => Ok(()),
            Err(e) => {
                error!(error = %e, "Failed to read terminal event");
                break;
            }
        };
        if sent.is_err() {
            break;
        }
    }
    debug!("Input reader stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::wizard::Step;

    fn app() -> App {
        App::new(&CooeeConfig {
            providers: ProviderConfig::instant(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn remount_without_view_starts_over() {
        let mut app = app();
        let state = app.controller.state_mut();
        state.current_step = Step::Payment;
        state.plan = None;

        app.remount();

        assert_eq!(app.controller.current_step(), Step::Number);
        assert!(matches!(app.screen, ScreenState::Number(_)));
    }

    #[test]
    fn input_reader_stops_when_receiver_closes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        rx.close();

        let mut polls = 0;
        forward_input(&tx, || {
            polls += 1;
            Ok(None)
        });
        assert_eq!(polls, 0);
    }

    #[test]
    fn input_reader_notices_close_while_idle() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);

        let mut polls = 0;
        forward_input(&tx, || {
            polls += 1;
            match polls {
                1 => Ok(Some(Event::Key(key))),
                2 => Ok(None),
                _ => {
                    rx.close();
                    Ok(None)
                }
            }
        });

        assert_eq!(polls, 3);
        assert!(matches!(rx.try_recv(), Ok(AppEvent::Key(k)) if k.code == KeyCode::Char('x')));
    }
}
