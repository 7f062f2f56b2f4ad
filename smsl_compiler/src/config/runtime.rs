// RUNTIME PREFERENCES (User Experience)
//
// Every preference struct reads its defaults from SMSL_* environment
// variables. A TOML file can override any subset of them.

use crate::logging::{codes, LogLevel};
use crate::optimizer::OptimizerPolicy;
use crate::semantic_analysis::{AttributionPolicy, SemanticInput};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcePreferences {
    /// Whether to reject files without the .smsl extension
    pub require_smsl_extension: bool,

    /// Whether to log size and line metrics after loading a file
    pub enable_performance_logging: bool,
}

impl Default for SourcePreferences {
    fn default() -> Self {
        Self {
            require_smsl_extension: env_flag(env_vars::REQUIRE_SMSL_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to count tokens per kind
    pub collect_detailed_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticPreferences {
    /// Which declared states an action statement counts toward
    pub attribution: AttributionPolicy,

    /// Whether the analyzer walks source lines or the token stream
    pub input: SemanticInput,
}

impl Default for SemanticPreferences {
    fn default() -> Self {
        Self {
            attribution: env::var(env_vars::SEMANTIC_ATTRIBUTION)
                .ok()
                .and_then(|v| AttributionPolicy::parse(&v))
                .unwrap_or_default(),
            input: env::var(env_vars::SEMANTIC_INPUT)
                .ok()
                .and_then(|v| SemanticInput::parse(&v))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerPreferences {
    pub policy: OptimizerPolicy,
}

impl Default for OptimizerPreferences {
    fn default() -> Self {
        Self {
            policy: env::var(env_vars::OPTIMIZER_POLICY)
                .ok()
                .and_then(|v| OptimizerPolicy::parse(&v))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelinePreferences {
    /// Stop after the first stage that reports diagnostics
    pub stop_on_errors: bool,
}

impl Default for PipelinePreferences {
    fn default() -> Self {
        Self {
            stop_on_errors: env_flag(env_vars::PIPELINE_STOP_ON_ERRORS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Whether to tag events with the compilation unit name
    pub include_source_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            include_source_context: env_flag(env_vars::LOGGING_INCLUDE_SOURCE_CONTEXT, true),
        }
    }
}

/// Parse log level from string (used for environment variables and the CLI)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Preferences file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read preferences file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("Invalid preferences in '{path}': {message}")]
    Parse { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        codes::system::CONFIGURATION_ERROR
    }
}

/// All runtime preferences for one compiler instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerPreferences {
    pub source: SourcePreferences,
    pub lexical: LexicalPreferences,
    pub semantic: SemanticPreferences,
    pub optimizer: OptimizerPreferences,
    pub pipeline: PipelinePreferences,
    pub logging: LoggingPreferences,
}

impl CompilerPreferences {
    /// Parse preferences from TOML text; missing keys keep their defaults
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: origin.clone(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text, &origin)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Source
    pub const REQUIRE_SMSL_EXTENSION: &str = "SMSL_REQUIRE_SMSL_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "SMSL_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "SMSL_LEXICAL_DETAILED_METRICS";

    // Semantic
    pub const SEMANTIC_ATTRIBUTION: &str = "SMSL_SEMANTIC_ATTRIBUTION";
    pub const SEMANTIC_INPUT: &str = "SMSL_SEMANTIC_INPUT";

    // Optimizer
    pub const OPTIMIZER_POLICY: &str = "SMSL_OPTIMIZER_POLICY";

    // Pipeline
    pub const PIPELINE_STOP_ON_ERRORS: &str = "SMSL_PIPELINE_STOP_ON_ERRORS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SMSL_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "SMSL_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_SOURCE_CONTEXT: &str = "SMSL_LOGGING_INCLUDE_SOURCE_CONTEXT";
}
