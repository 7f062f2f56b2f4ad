use crate::config::ConfigError;

/// Failures of the compilation run itself. Problems in the program being
/// compiled are diagnostics, not errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Writing compilation output failed: {0}")]
    Sink(#[from] std::io::Error),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::Config(error) => error.error_code(),
            PipelineError::Sink(_) | PipelineError::Serialization(_) => {
                crate::logging::codes::system::INTERNAL_ERROR
            }
        }
    }
}
