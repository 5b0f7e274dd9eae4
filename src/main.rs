//=========================================================================
// Aetheric Runtime — Desktop Entry Point
//
// Loads `Data/app_config.ron` (defaults when absent), opens the desktop
// window and runs until a quit is requested.
//
// Logging is configured through RUST_LOG, e.g. `RUST_LOG=app=debug`.
//
//=========================================================================

use std::process::ExitCode;

use log::error;

use aetheric_runtime::prelude::*;

const CONFIG_PATH: &str = "Data/app_config.ron";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            error!(target: "app", "Invalid config {}: {}", CONFIG_PATH, e);
            return ExitCode::FAILURE;
        }
    };

    match AppBuilder::new().with_config(config).build(DesktopFactory::new()).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: "app", "Exited with error: {}", e);
            ExitCode::FAILURE
        }
    }
}
