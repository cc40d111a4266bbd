use ratatui::crossterm::event::KeyEvent;

use crate::providers::{ProviderResult, Receipt, Registration};
use crate::wizard::{Country, Money, Plan, StepResult, UserProfile};

/// All possible events in the application
///
/// Provider results carry the id of the request that produced them; the app
/// drops any result whose id is no longer the one the screen is waiting on.
#[derive(Debug)]
pub enum AppEvent {
    // Input events
    Key(KeyEvent),
    Resize(u16, u16),

    // Provider responses
    CountriesLoaded {
        request: u64,
        result: ProviderResult<Vec<Country>>,
    },
    NumbersLoaded {
        request: u64,
        country: String,
        result: ProviderResult<Vec<String>>,
    },
    PlansLoaded {
        request: u64,
        result: ProviderResult<Vec<Plan>>,
    },
    Registered {
        request: u64,
        result: ProviderResult<Registration>,
    },
    Paid {
        request: u64,
        result: ProviderResult<Receipt>,
    },

    // UI events
    Tick, // spinner frames
}

/// What a handled event asks the app to do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hand a step result to the controller
    Advance(StepResult),
    Back,
    /// Back to the first step with everything cleared
    Reset,
    Quit,
    LoadCountries,
    LoadNumbers(String),
    LoadPlans,
    Register(UserProfile),
    Pay(Money),
}
