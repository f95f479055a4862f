//! Elliot Dash entry point
//!
//! Sets up logging and settings, takes over the terminal and runs the game.
//! Logs go to stderr; redirect it (`2>dash.log`) when raising `RUST_LOG`.

use elliot_dash::platform::TerminalPlatform;
use elliot_dash::{Error, Session, Settings};

fn main() -> elliot_dash::Result<()> {
    env_logger::init();
    log::info!("Elliot Dash starting...");

    let settings = Settings::load();
    let seed = settings.resolve_seed();
    log::info!("Session seed: {seed}");

    let mut platform = TerminalPlatform::new()?;
    let result = Session::new(seed).run(&mut platform, &settings);
    // Restore the terminal before anything is printed
    drop(platform);

    match result {
        Ok(()) | Err(Error::WindowClosed) => {
            log::info!("Bye");
            Ok(())
        }
        Err(e) => {
            log::error!("Fatal: {e}");
            Err(e)
        }
    }
}
