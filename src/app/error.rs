//=========================================================================
// Application Errors
//=========================================================================

use thiserror::Error;

use super::config::ConfigError;
use crate::core::clock::ClockError;
use crate::core::subsystem::SubsystemError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Subsystem(#[from] SubsystemError),

    #[error(transparent)]
    Clock(#[from] ClockError),
}
