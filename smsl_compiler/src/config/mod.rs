//! Compiler configuration
//!
//! Limits come from the build profile TOML through `build.rs`; preferences
//! are read at runtime (see [`runtime`]).

// Generated by build.rs from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

pub use runtime::{CompilerPreferences, ConfigError};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("SMSL_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("SMSL_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_compile_time_limits_are_sane() {
        assert!(compile_time::source::MAX_FILE_SIZE > 0);
        assert!(compile_time::source::MAX_LINE_COUNT > 0);
        assert!(compile_time::lexical::MAX_LEXEME_LENGTH > 0);
        assert!(compile_time::lexical::MAX_TOKEN_COUNT > 0);
        assert!(compile_time::logging::MAX_LOG_MESSAGE_LENGTH >= 64);
    }

    #[test]
    fn test_build_info() {
        assert!(super::build_info::source_info().ends_with(".toml"));
    }
}
