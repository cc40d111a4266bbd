//! Data and action providers consumed by the step views
//!
//! Views only see the two traits below. [`MockProvider`] backs both with
//! canned catalog data, generated phone numbers and timed responses.

pub mod catalog;
pub mod mock;
pub mod numbers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wizard::state::{Country, Money, Plan, UserProfile};

pub use mock::MockProvider;
pub use numbers::NumberFormat;

/// How many numbers are offered per country
pub const NUMBERS_PER_COUNTRY: usize = 8;

/// Failure reported by a provider. Always recoverable by retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{operation} is temporarily unavailable")]
    Unavailable { operation: &'static str },

    #[error("{operation} was rejected: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Response of the registration action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub user_id: String,
}

/// Response of the payment action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_id: String,
    pub amount: Money,
}

/// Read-only catalog lookups
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_countries(&self) -> ProviderResult<Vec<Country>>;

    /// Exactly [`NUMBERS_PER_COUNTRY`] distinct numbers for the country
    async fn fetch_numbers_by_country(&self, code: &str) -> ProviderResult<Vec<String>>;

    async fn fetch_plans(&self) -> ProviderResult<Vec<Plan>>;
}

/// Transactional actions
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn register(&self, profile: &UserProfile) -> ProviderResult<Registration>;

    async fn pay(&self, amount: Money) -> ProviderResult<Receipt>;
}
