use async_trait::async_trait;

use super::CommandHandler;
use crate::config::CooeeConfig;
use crate::Result;

/// Handler for the `signup` command
pub struct SignupCommand {
    pub config: CooeeConfig,
}

impl SignupCommand {
    pub fn new(config: CooeeConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CommandHandler for SignupCommand {
    #[cfg(feature = "tui")]
    async fn execute(&self) -> Result<()> {
        crate::cli::tui::run_signup_wizard(self.config.clone()).await
    }

    #[cfg(not(feature = "tui"))]
    async fn execute(&self) -> Result<()> {
        Err(crate::CooeeError::Cli(
            "cooee was built without the `tui` feature; try `cooee demo`".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "signup"
    }
}
