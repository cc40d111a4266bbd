pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod providers;
pub mod validation;
pub mod wizard;

pub use error::{CooeeError, Result};
