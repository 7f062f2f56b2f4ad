//! Error and success codes with their classification metadata
//!
//! Every diagnostic and log event carries a [`Code`]. The registry below maps
//! each error code to its category, severity and the action a user should take.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Code wrapper shared by error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Source provider error codes
pub mod source {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const UNKNOWN_LEXEME: Code = Code::new("E020");
    pub const LEXEME_TOO_LONG: Code = Code::new("E023");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Statement shape error codes
pub mod syntax {
    use super::Code;

    pub const INVALID_STATEMENT: Code = Code::new("E043");
}

/// Semantic analysis error codes
pub mod semantic {
    use super::Code;

    pub const DUPLICATE_STATE: Code = Code::new("E090");
    pub const UNDEFINED_STATE_REFERENCE: Code = Code::new("E110");
    pub const STATE_WITHOUT_CONTENT: Code = Code::new("E120");
    pub const INVALID_TRANSITION_FORMAT: Code = Code::new("E121");
}

/// Intermediate code generation error codes
pub mod generation {
    use super::Code;

    pub const INVALID_ACTION: Code = Code::new("E150");
    pub const INVALID_TRANSITION: Code = Code::new("E151");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const COMPILATION_COMPLETE: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const SOURCE_LOADED: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const SYNTAX_VALIDATION_PASSED: Code = Code::new("I041");
    pub const SEMANTIC_ANALYSIS_COMPLETE: Code = Code::new("I070");
    pub const INTERMEDIATE_CODE_GENERATED: Code = Code::new("I090");
    pub const OPTIMIZATION_COMPLETE: Code = Code::new("I091");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

type RegistryRow = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

// (code, category, severity, recoverable, requires_halt, description, action)
#[rustfmt::skip]
const REGISTRY_ROWS: &[RegistryRow] = &[
    ("ERR001", "System", Severity::Critical, false, true,
        "Critical internal compiler error",
        "File a bug report with the failing input"),
    ("ERR002", "System", Severity::Critical, false, true,
        "Compiler initialization failure",
        "Check logging and runtime configuration"),
    ("ERR003", "System", Severity::High, false, true,
        "Invalid or unreadable configuration file",
        "Fix the TOML preferences file or remove it"),
    ("E005", "Source", Severity::Medium, false, true,
        "Source file not found",
        "Verify the file path exists and is accessible"),
    ("E006", "Source", Severity::Low, true, false,
        "Source file does not have the .smsl extension",
        "Rename the file or disable the extension requirement"),
    ("E007", "Source", Severity::High, false, true,
        "Source file exceeds the configured size limit",
        "Split the state machine or raise max_file_size in the build profile"),
    ("E009", "Source", Severity::High, false, true,
        "Permission denied reading source",
        "Check file permissions"),
    ("E010", "Source", Severity::Medium, false, true,
        "Source is not valid UTF-8",
        "Re-encode the source file as UTF-8"),
    ("E011", "Source", Severity::High, false, true,
        "I/O error while reading source",
        "Check file system health and retry"),
    ("E012", "Source", Severity::Medium, false, true,
        "Invalid source path",
        "Provide a path to a regular file"),
    ("E013", "Source", Severity::High, false, true,
        "Source exceeds the configured line limit",
        "Split the state machine or raise max_line_count in the build profile"),
    ("E020", "Lexical", Severity::Medium, true, false,
        "Unknown lexeme",
        "Remove characters that are not part of the SMSL vocabulary"),
    ("E023", "Lexical", Severity::Medium, true, false,
        "Lexeme exceeds the configured length limit",
        "Shorten the identifier or string literal"),
    ("E027", "Lexical", Severity::High, false, true,
        "Token count exceeds the configured limit",
        "Split the state machine into smaller units"),
    ("E043", "Syntax", Severity::High, true, false,
        "Statement does not match any SMSL statement shape",
        "Use state, transition, action, start;/end; or a brace line"),
    ("E090", "Semantic", Severity::High, true, false,
        "State declared more than once",
        "Rename or remove the repeated declaration"),
    ("E110", "Semantic", Severity::High, true, false,
        "Transition targets a state that is never declared",
        "Declare the target state or fix the reference"),
    ("E120", "Semantic", Severity::Medium, true, false,
        "State has no action attributed to it",
        "Add an action directly after the state declaration"),
    ("E121", "Semantic", Severity::High, true, false,
        "Transition statement cannot be split into name, event and target",
        "Use `transition <name>: <event> -> <target> {`"),
    ("E150", "Generation", Severity::Medium, true, false,
        "Action statement has no action name",
        "Use `action <name>;`"),
    ("E151", "Generation", Severity::Medium, true, false,
        "Transition statement cannot be lowered to a quadruple",
        "Use `transition <name>: <event> -> <target> {`"),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ROWS
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category; success codes report "Success"
pub fn get_category(code: &str) -> &'static str {
    match get_error_metadata(code) {
        Some(metadata) => metadata.category,
        None if code.starts_with('I') => "Success",
        None => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            system::CONFIGURATION_ERROR,
            source::FILE_NOT_FOUND,
            source::INVALID_EXTENSION,
            source::FILE_TOO_LARGE,
            source::PERMISSION_DENIED,
            source::INVALID_ENCODING,
            source::IO_ERROR,
            source::INVALID_PATH,
            source::TOO_MANY_LINES,
            lexical::UNKNOWN_LEXEME,
            lexical::LEXEME_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
            syntax::INVALID_STATEMENT,
            semantic::DUPLICATE_STATE,
            semantic::UNDEFINED_STATE_REFERENCE,
            semantic::STATE_WITHOUT_CONTENT,
            semantic::INVALID_TRANSITION_FORMAT,
            generation::INVALID_ACTION,
            generation::INVALID_TRANSITION,
        ];

        for code in codes {
            let metadata = get_error_metadata(code.as_str());
            assert!(metadata.is_some(), "missing metadata for {}", code);
            assert_eq!(metadata.map(|m| m.code), Some(code.as_str()));
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E020"), "Lexical");
        assert_eq!(get_severity("E090"), Severity::High);
        assert!(is_recoverable("E043"));
        assert!(requires_halt("E005"));
        assert_eq!(get_category(success::TOKENIZATION_COMPLETE.as_str()), "Success");
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_action("E999"), "No specific action available");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_severity("E999"), Severity::Medium);
    }

    #[test]
    fn test_code_serializes_as_string() {
        let json = serde_json::to_string(&lexical::UNKNOWN_LEXEME).unwrap();
        assert_eq!(json, "\"E020\"");
    }
}
