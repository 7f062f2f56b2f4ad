//! Runtime logging preferences
//!
//! Preferences are installed once at startup. Until then the environment-driven
//! defaults from [`LoggingPreferences`] apply.

use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences. Fails if already installed.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime logging preferences already initialized".to_string())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

pub fn get_min_log_level() -> LogLevel {
    get_runtime_preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn include_source_context() -> bool {
    get_runtime_preferences().include_source_context
}

/// One-line summary for `--verbose` startup output
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();
    format!(
        "min_level={} structured={} source_context={} profile={}",
        preferences.min_log_level.as_str(),
        preferences.use_structured_logging,
        preferences.include_source_context,
        crate::config::build_info::profile()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_summary_mentions_level() {
        let summary = get_config_summary();
        assert!(summary.contains("min_level="));
        assert!(summary.contains("profile="));
    }
}
