use cooee::cli::tui::signup::app::App;
use cooee::cli::tui::signup::events::AppEvent;
use cooee::cli::tui::signup::state::*;
use cooee::config::{CooeeConfig, ProviderConfig};
use cooee::wizard::forms::{PaymentField, PaymentForm, RegisterField};
use cooee::wizard::{Money, Plan, Selection, Step, StepView, UserProfile};
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;

fn profile() -> UserProfile {
    UserProfile {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        password: "longenough".into(),
        confirm_password: "longenough".into(),
        address: Some("1 Harbour St".into()),
        consent_given: true,
        user_id: "usr_1".into(),
    }
}

fn screen_text(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_screen_follows_view() {
    let selection = Selection {
        country: "AU".into(),
        number: "+61 4 1234 5678".into(),
    };
    let screen = ScreenState::from_view(&StepView::Number {
        selection: Some(&selection),
    });
    assert_eq!(screen.step(), Step::Number);
    assert!(!screen.takes_text());
    match screen {
        ScreenState::Number(s) => {
            assert_eq!(s.focus, NumberFocus::Numbers);
            assert_eq!(s.form.country.as_deref(), Some("AU"));
        }
        _ => panic!("expected number screen"),
    }

    let screen = ScreenState::from_view(&StepView::Payment {
        amount: Money::from_units(25),
    });
    assert_eq!(screen.step(), Step::Payment);
    assert!(screen.takes_text());
    assert!(!screen.is_busy());
}

#[test]
fn test_register_screen_prefill_skips_passwords() {
    let user = profile();
    let screen = RegisterScreen::new(
        cooee::wizard::forms::RegistrationForm::from_defaults(Some(&user)),
    );

    assert_eq!(screen.inputs[&RegisterField::Name].value(), "Jane Doe");
    assert_eq!(screen.inputs[&RegisterField::Email].value(), "jane@example.com");
    assert_eq!(screen.inputs[&RegisterField::Address].value(), "1 Harbour St");
    assert_eq!(screen.inputs[&RegisterField::Password].value(), "");
    assert_eq!(screen.inputs[&RegisterField::Confirm].value(), "");
    assert!(!screen.inputs.contains_key(&RegisterField::Consent));
    assert!(!screen.form.consent);
}

#[test]
fn test_register_focus_wraps_and_touches() {
    let mut screen = RegisterScreen::new(Default::default());
    assert_eq!(screen.focused_field(), RegisterField::Name);

    screen.move_focus(false);
    assert_eq!(screen.focused_field(), RegisterField::Consent);
    assert!(screen.form.is_touched(RegisterField::Name));

    screen.move_focus(true);
    assert_eq!(screen.focused_field(), RegisterField::Name);
    assert_eq!(
        screen.form.visible_error(RegisterField::Consent),
        Some("You must agree before continuing.")
    );
}

#[test]
fn test_payment_inputs_follow_normalized_form() {
    let mut screen = PaymentScreen::new(PaymentForm::new(Money::from_units(12)));
    screen.form.set_value(PaymentField::Number, "4111-1111 1111x1111");
    screen.form.set_value(PaymentField::Cvc, "1a2b3");
    screen.resync_inputs();

    assert_eq!(
        screen.inputs[&PaymentField::Number].value(),
        "4111 1111 1111 1111"
    );
    assert_eq!(screen.inputs[&PaymentField::Cvc].value(), "123");
}

#[test]
fn test_plan_cursor_lands_on_stored_plan() {
    let plans = cooee::providers::catalog::plans();
    let premium: &Plan = plans.iter().find(|p| p.id == "premium").unwrap();
    let mut screen = PlanScreen::new(cooee::wizard::forms::PlanForm::new(Some(premium)));
    screen.form.plans_loaded(Ok(plans.clone()));
    screen.sync_cursor();
    assert_eq!(screen.cursor, 2);
}

#[tokio::test]
async fn test_renders_brand_and_stepper() {
    let config = CooeeConfig {
        providers: ProviderConfig::instant(),
        ..Default::default()
    };
    let mut app = App::new(&config);
    app.mount();
    let event = app.next_event().await.unwrap();
    app.update(event);

    let text = screen_text(&app);
    assert!(text.contains("COOEE"));
    assert!(text.contains("1 Number"));
    assert!(text.contains("5 Done"));
    assert!(text.contains("Country"));
    assert!(text.contains("Select a country to see available numbers."));
}

#[tokio::test]
async fn test_renders_checkmarks_after_first_step() {
    let config = CooeeConfig {
        providers: ProviderConfig::instant(),
        ..Default::default()
    };
    let mut app = App::new(&config);
    app.mount();
    let event = app.next_event().await.unwrap();
    app.update(event);

    let enter = || AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    app.update(enter());
    let event = app.next_event().await.unwrap();
    app.update(event);
    app.update(enter());
    let event = app.next_event().await.unwrap();
    app.update(event);

    let text = screen_text(&app);
    assert!(text.contains("✓ Number"));
    assert!(text.contains("2 Plan"));
    assert!(text.contains("$12/mo"));
    assert!(text.contains("500 mins"));
}
