use crate::errors::SweeperError;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Sweeper name cannot be empty")]
    EmptyName,

    #[error("Sweeper '{name}' is already registered")]
    DuplicateSweeper { name: String },

    #[error("Unknown sweeper '{name}'")]
    UnknownSweeper { name: String },

    #[error("Sweeper '{sweeper}' depends on unregistered sweeper '{dependency}'")]
    UnknownDependency { sweeper: String, dependency: String },

    #[error("Sweeper dependency cycle: {chain}")]
    DependencyCycle { chain: String },
}

impl SweeperError for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::EmptyName => "REGISTRY_EMPTY_NAME",
            RegistryError::DuplicateSweeper { .. } => "REGISTRY_DUPLICATE_SWEEPER",
            RegistryError::UnknownSweeper { .. } => "REGISTRY_UNKNOWN_SWEEPER",
            RegistryError::UnknownDependency { .. } => "REGISTRY_UNKNOWN_DEPENDENCY",
            RegistryError::DependencyCycle { .. } => "REGISTRY_DEPENDENCY_CYCLE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, RegistryError::UnknownSweeper { .. })
    }
}
