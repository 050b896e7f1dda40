use crate::errors::SweeperError;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixture '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse fixture '{path}': {message}")]
    ParseFailed { path: String, message: String },

    #[error("Failed to serialize fixture '{path}': {message}")]
    SerializeFailed { path: String, message: String },

    #[error("Failed to write fixture '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("UnrecognizedRegion: region '{region}' is not defined in the fixture")]
    UnknownRegion { region: String },

    #[error("InvalidNextTokenException: the next token '{token}' is invalid")]
    InvalidToken { token: String },

    #[error("AccessDeniedException: User is not authorized to perform: {operation} in {region}")]
    AccessDenied { operation: String, region: String },

    #[error("ApplicationDoesNotExistException: application '{name}' does not exist")]
    ApplicationNotFound { name: String },

    #[error("InternalFailure: failed to delete application '{name}'")]
    DeleteFailed { name: String },
}

impl SweeperError for FixtureError {
    fn error_code(&self) -> &'static str {
        match self {
            FixtureError::ReadFailed { .. } => "FIXTURE_READ_FAILED",
            FixtureError::ParseFailed { .. } => "FIXTURE_PARSE_FAILED",
            FixtureError::SerializeFailed { .. } => "FIXTURE_SERIALIZE_FAILED",
            FixtureError::WriteFailed { .. } => "FIXTURE_WRITE_FAILED",
            FixtureError::UnknownRegion { .. } => "FIXTURE_UNKNOWN_REGION",
            FixtureError::InvalidToken { .. } => "FIXTURE_INVALID_TOKEN",
            FixtureError::AccessDenied { .. } => "FIXTURE_ACCESS_DENIED",
            FixtureError::ApplicationNotFound { .. } => "FIXTURE_APPLICATION_NOT_FOUND",
            FixtureError::DeleteFailed { .. } => "FIXTURE_DELETE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            FixtureError::ParseFailed { .. } | FixtureError::UnknownRegion { .. }
        )
    }
}
