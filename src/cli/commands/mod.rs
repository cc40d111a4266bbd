pub mod catalog;
pub mod demo;
pub mod signup;

use async_trait::async_trait;

use crate::Result;

/// Common trait for all command handlers
#[async_trait]
pub trait CommandHandler {
    /// Execute the command
    async fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}
