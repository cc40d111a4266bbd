//! Wizard core: step state machine, step forms and the scripted runner

pub mod controller;
pub mod forms;
pub mod script;
pub mod state;

pub use controller::{Confirmation, StepView, TransitionError, WizardController};
pub use script::{SignupScript, SignupSummary};
pub use state::{
    Country, Direction, Money, PaymentResult, Plan, Selection, Step, StepResult, UserProfile,
    WizardState,
};
