#[macro_use]
pub mod logging;

pub mod config;
pub mod diagnostics;
pub mod grammar;
pub mod intermediate;
pub mod lexical;
pub mod optimizer;
pub mod pipeline;
pub mod report;
pub mod semantic_analysis;
pub mod source;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use config::CompilerPreferences;
pub use diagnostics::{Diagnostic, Stage};
pub use intermediate::{Operation, Quadruple};
pub use pipeline::{
    compile, CompilationReport, CompilationStatus, Compiler, DiagnosticsSink, MemorySink,
    PipelineError, QuadrupleTable,
};
pub use source::{FileSource, InMemorySource, SourceError, SourceProvider};
