use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::wizard::SignupScript;

/// Cooee: pick a phone number, choose a plan, sign up and pay
#[derive(Parser, Debug)]
#[command(name = "cooee")]
#[command(version)]
#[command(about = "Signup and checkout wizard for a new phone number")]
#[command(
    long_about = "Cooee walks you through choosing a number by country, picking a subscription plan, creating an account and paying. All backend calls are simulated."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./cooee.yaml, then the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level, overrides `logging.level` from the configuration
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive signup wizard
    Signup,

    /// Run the whole wizard headless with scripted answers
    Demo {
        #[command(flatten)]
        answers: DemoArgs,

        /// Skip the simulated provider delays
        #[arg(long)]
        instant: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Query the (simulated) catalog
    Catalog {
        #[command(subcommand)]
        query: CatalogQuery,

        /// Output format
        #[arg(long, value_enum, default_value = "text", global = true)]
        format: OutputFormat,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Signup => "signup",
            Commands::Demo { .. } => "demo",
            Commands::Catalog { .. } => "catalog",
        }
    }

    /// The TUI owns the terminal, so its logs go to a file
    pub fn logs_to_file(&self) -> bool {
        matches!(self, Commands::Signup)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// List the countries numbers are offered in
    Countries,
    /// List subscription plans
    Plans,
    /// Generate available numbers for a country
    Numbers {
        /// Country code, e.g. US
        #[arg(long)]
        country: String,
    },
}

/// Scripted answers; anything left out uses the demo defaults
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoArgs {
    /// Country code
    #[arg(long)]
    pub country: Option<String>,

    /// Which of the offered numbers to take (0-based)
    #[arg(long)]
    pub number_index: Option<usize>,

    /// Plan id (basic, pro, premium)
    #[arg(long)]
    pub plan: Option<String>,

    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// 16-digit card number
    #[arg(long)]
    pub card: Option<String>,

    /// Card expiry as MM/YY
    #[arg(long)]
    pub expiry: Option<String>,

    #[arg(long)]
    pub cvc: Option<String>,

    /// Name on card
    #[arg(long)]
    pub cardholder: Option<String>,
}

impl DemoArgs {
    pub fn into_script(self) -> SignupScript {
        let defaults = SignupScript::default();
        SignupScript {
            country: self.country.unwrap_or(defaults.country),
            number_index: self.number_index.unwrap_or(defaults.number_index),
            plan_id: self.plan.unwrap_or(defaults.plan_id),
            name: self.name.unwrap_or(defaults.name),
            email: self.email.unwrap_or(defaults.email),
            password: self.password.unwrap_or(defaults.password),
            address: self.address.or(defaults.address),
            card_number: self.card.unwrap_or(defaults.card_number),
            expiry: self.expiry.unwrap_or(defaults.expiry),
            cvc: self.cvc.unwrap_or(defaults.cvc),
            cardholder: self.cardholder.unwrap_or(defaults.cardholder),
        }
    }
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
