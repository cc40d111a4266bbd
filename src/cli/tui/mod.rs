/// Terminal User Interface module for interactive commands
pub mod signup;

use crate::config::CooeeConfig;
use crate::Result;

/// Run the interactive signup wizard
pub async fn run_signup_wizard(config: CooeeConfig) -> Result<()> {
    signup::run(config).await
}
