use crate::errors::SweeperError;
use crate::registry::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("No regions to sweep: set the SWEEP environment variable, sweep.regions or --region")]
    NoRegions,

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl SweeperError for RunnerError {
    fn error_code(&self) -> &'static str {
        match self {
            RunnerError::NoRegions => "RUNNER_NO_REGIONS",
            RunnerError::Registry(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            RunnerError::NoRegions => true,
            RunnerError::Registry(e) => e.is_user_error(),
        }
    }
}
