//! Compilation pipeline
//!
//! Runs source → lexical → syntax → semantic → generation → optimization for
//! one unit and hands each stage's output to a [`DiagnosticsSink`]. With
//! `stop_on_errors` set, the first stage reporting diagnostics ends the run.

mod error;
mod result;
mod sink;

pub use error::PipelineError;
pub use result::{CompilationReport, CompilationStatus};
pub use sink::{DiagnosticsSink, MemorySink, QuadrupleTable};

use crate::config::CompilerPreferences;
use crate::diagnostics::{Diagnostic, Stage};
use crate::intermediate::IntermediateCodeGenerator;
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use crate::optimizer::Optimizer;
use crate::semantic_analysis::SemanticAnalyzer;
use crate::source::SourceProvider;
use crate::syntax::check_syntax;
use crate::{log_debug, log_info};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    preferences: CompilerPreferences,
}

impl Compiler {
    pub fn new(preferences: CompilerPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &CompilerPreferences {
        &self.preferences
    }

    /// Compile one unit. `Err` only when the sink fails; problems in the
    /// program itself are reported as diagnostics.
    pub fn compile<P, S>(&self, provider: &P, sink: &mut S) -> Result<CompilationReport, PipelineError>
    where
        P: SourceProvider + ?Sized,
        S: DiagnosticsSink + ?Sized,
    {
        let start_time = Instant::now();

        logging::with_source_context(provider.name(), || {
            log_info!("Starting compilation",
                "unit" => provider.name(),
                "stop_on_errors" => self.preferences.pipeline.stop_on_errors);

            let mut report = CompilationReport::new(provider.name());
            self.run(provider, sink, &mut report)?;

            report.settle(start_time.elapsed());
            report.log_summary();
            Ok(report)
        })
    }

    fn run<P, S>(
        &self,
        provider: &P,
        sink: &mut S,
        report: &mut CompilationReport,
    ) -> Result<(), PipelineError>
    where
        P: SourceProvider + ?Sized,
        S: DiagnosticsSink + ?Sized,
    {
        let lines = match provider.read_lines() {
            Ok(lines) => lines,
            Err(error) => {
                let failure = Diagnostic::io_failure(error.error_code(), error.to_string());
                sink.diagnostics(None, std::slice::from_ref(&failure))?;
                report.io_failure = Some(failure);
                return Ok(());
            }
        };

        // Lexical
        let lexed = LexicalAnalyzer::with_preferences(self.preferences.lexical.clone())
            .tokenize(&lines);
        report.token_count = lexed.tokens.len();
        sink.tokens(&lexed.tokens)?;
        sink.diagnostics(Some(Stage::Lexical), &lexed.diagnostics)?;
        report.lexical = lexed.diagnostics;
        if self.halts(Stage::Lexical, report.lexical.len(), report) {
            return Ok(());
        }

        // Syntax
        let syntax = check_syntax(&lines);
        sink.diagnostics(Some(Stage::Syntax), &syntax.diagnostics)?;
        report.syntax = syntax.diagnostics;
        if self.halts(Stage::Syntax, report.syntax.len(), report) {
            return Ok(());
        }

        // Semantic
        let semantic = SemanticAnalyzer::with_preferences(self.preferences.semantic.clone())
            .analyze(&lines, &lexed.tokens);
        sink.diagnostics(Some(Stage::Semantic), &semantic.diagnostics)?;
        report.states = semantic.states;
        report.semantic = semantic.diagnostics;
        if self.halts(Stage::Semantic, report.semantic.len(), report) {
            return Ok(());
        }

        // Generation and optimization
        let generated = IntermediateCodeGenerator::new().generate(&lines);
        sink.quadruples(QuadrupleTable::Intermediate, &generated.quadruples)?;
        report.generation_errors = generated.errors.iter().map(ToString::to_string).collect();

        let optimized = Optimizer::with_preferences(&self.preferences.optimizer)
            .optimize(&generated.quadruples);
        sink.quadruples(QuadrupleTable::Optimized, &optimized.quadruples)?;

        report.intermediate = generated.quadruples;
        report.optimized = optimized.quadruples;
        report.optimization = Some(optimized.stats);

        Ok(())
    }

    /// Record and return whether `stage` ends the run
    fn halts(&self, stage: Stage, diagnostic_count: usize, report: &mut CompilationReport) -> bool {
        if diagnostic_count == 0 || !self.preferences.pipeline.stop_on_errors {
            return false;
        }

        log_debug!("Stopping after stage with diagnostics",
            "stage" => stage,
            "diagnostics" => diagnostic_count);
        report.halted_at = Some(stage);
        true
    }
}

/// Compile with default preferences
pub fn compile<P, S>(provider: &P, sink: &mut S) -> Result<CompilationReport, PipelineError>
where
    P: SourceProvider + ?Sized,
    S: DiagnosticsSink + ?Sized,
{
    Compiler::default().compile(provider, sink)
}
