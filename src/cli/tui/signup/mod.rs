/// Interactive signup wizard
pub mod app;
pub mod events;
pub mod screens;
pub mod state;
pub mod theme;

use crate::config::CooeeConfig;
use crate::Result;

/// Entry point for the signup wizard
pub async fn run(config: CooeeConfig) -> Result<()> {
    let app = app::App::new(&config);
    app.run().await
}
