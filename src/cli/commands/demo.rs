use async_trait::async_trait;
use tracing::info;

use super::CommandHandler;
use crate::cli::app::OutputFormat;
use crate::config::ProviderConfig;
use crate::providers::MockProvider;
use crate::wizard::{SignupScript, SignupSummary, WizardController};
use crate::Result;

/// Handler for the `demo` command
pub struct DemoCommand {
    pub providers: ProviderConfig,
    pub script: SignupScript,
    pub format: OutputFormat,
}

impl DemoCommand {
    /// `instant` drops the simulated delays but keeps seed and failure rate
    pub fn new(
        providers: ProviderConfig,
        script: SignupScript,
        format: OutputFormat,
        instant: bool,
    ) -> Self {
        let providers = if instant {
            ProviderConfig {
                failure_rate: providers.failure_rate,
                seed: providers.seed,
                ..ProviderConfig::instant()
            }
        } else {
            providers
        };
        Self {
            providers,
            script,
            format,
        }
    }

    /// Run the script against a fresh controller and mock backend
    pub async fn run(&self) -> Result<SignupSummary> {
        let provider = MockProvider::new(self.providers.clone());
        let mut controller = WizardController::new();
        self.script.run(&mut controller, &provider, &provider).await
    }
}

#[async_trait]
impl CommandHandler for DemoCommand {
    async fn execute(&self) -> Result<()> {
        info!(country = %self.script.country, plan = %self.script.plan_id, "Starting scripted signup");
        let summary = self.run().await?;
        match self.format {
            OutputFormat::Text => print!("{}", render_text(&summary)),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "demo"
    }
}

/// Plain-text confirmation, the same facts the confirmation screen shows
pub fn render_text(summary: &SignupSummary) -> String {
    format!(
        "Activated\n\
         Your number: {}\n\
         Plan: {}\n\
         Amount: {} (card •••• {})\n\
         User: {}\n\
         Txn: {}\n",
        summary.number,
        summary.plan,
        summary.amount.fixed(),
        summary.last4,
        summary.user_id,
        summary.transaction_id
    )
}
