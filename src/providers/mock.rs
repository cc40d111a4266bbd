//! Simulated backend: timed responses with canned or random data

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;
use tracing::{debug, warn};

use super::{
    catalog, ActionProvider, CatalogProvider, NumberFormat, ProviderError, ProviderResult,
    Receipt, Registration, NUMBERS_PER_COUNTRY,
};
use crate::config::ProviderConfig;
use crate::wizard::state::{Country, Money, Plan, UserProfile};

/// Mock implementation of both provider traits
///
/// Every call sleeps for its configured delay, then either fails with
/// probability `failure_rate` or returns its data. With the default
/// configuration it never fails.
pub struct MockProvider {
    config: ProviderConfig,
    rng: Mutex<StdRng>,
}

impl MockProvider {
    pub fn new(config: ProviderConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn simulate(&self, operation: &'static str, delay: Duration) -> ProviderResult<()> {
        if !delay.is_zero() {
            sleep(delay).await;
        }
        if self.should_fail() {
            warn!(operation, "Simulated provider failure");
            return Err(ProviderError::Unavailable { operation });
        }
        debug!(operation, delay_ms = delay.as_millis() as u64, "Provider call completed");
        Ok(())
    }

    fn should_fail(&self) -> bool {
        let rate = self.config.failure_rate;
        if rate.is_nan() || rate <= 0.0 {
            return false;
        }
        self.with_rng(|rng| rng.gen_bool(rate.min(1.0)))
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

fn timestamp_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Utc::now().timestamp_millis())
}

#[async_trait]
impl CatalogProvider for MockProvider {
    async fn fetch_countries(&self) -> ProviderResult<Vec<Country>> {
        self.simulate("fetch countries", self.config.countries_delay())
            .await?;
        Ok(catalog::countries())
    }

    async fn fetch_numbers_by_country(&self, code: &str) -> ProviderResult<Vec<String>> {
        self.simulate("fetch numbers", self.config.numbers_delay())
            .await?;
        let format = NumberFormat::for_country(code);
        let numbers = self.with_rng(|rng| format.generate_distinct(rng, NUMBERS_PER_COUNTRY));
        debug!(country = code, count = numbers.len(), "Generated numbers");
        Ok(numbers)
    }

    async fn fetch_plans(&self) -> ProviderResult<Vec<Plan>> {
        self.simulate("fetch plans", self.config.plans_delay()).await?;
        Ok(catalog::plans())
    }
}

#[async_trait]
impl ActionProvider for MockProvider {
    async fn register(&self, profile: &UserProfile) -> ProviderResult<Registration> {
        self.simulate("registration", self.config.register_delay())
            .await?;
        let user_id = timestamp_id("usr");
        debug!(user_id = %user_id, email = %profile.email, "Registered user");
        Ok(Registration { user_id })
    }

    async fn pay(&self, amount: Money) -> ProviderResult<Receipt> {
        self.simulate("payment", self.config.pay_delay()).await?;
        let transaction_id = timestamp_id("txn");
        debug!(transaction_id = %transaction_id, amount = %amount, "Payment captured");
        Ok(Receipt {
            transaction_id,
            amount,
        })
    }
}
