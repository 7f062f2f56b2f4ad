use crate::diagnostics::{Diagnostic, Stage};
use crate::intermediate::Quadruple;
use crate::optimizer::OptimizationStats;
use crate::semantic_analysis::StateRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilationStatus {
    /// No diagnostics in any stage that ran
    Compiled,
    /// At least one stage reported diagnostics
    Diagnostics,
    /// The source could not be read
    SourceUnreadable,
}

/// Everything one compilation run produced
#[derive(Debug, Clone, Serialize)]
pub struct CompilationReport {
    pub unit: String,
    pub compiled_at: DateTime<Utc>,
    pub status: CompilationStatus,
    /// Stage whose diagnostics stopped the run
    pub halted_at: Option<Stage>,
    pub token_count: usize,
    pub lexical: Vec<Diagnostic>,
    pub syntax: Vec<Diagnostic>,
    pub semantic: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io_failure: Option<Diagnostic>,
    pub generation_errors: Vec<String>,
    pub states: Vec<StateRecord>,
    pub intermediate: Vec<Quadruple>,
    pub optimized: Vec<Quadruple>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizationStats>,
    #[serde(skip)]
    pub duration: Duration,
}

impl CompilationReport {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            compiled_at: Utc::now(),
            status: CompilationStatus::Compiled,
            halted_at: None,
            token_count: 0,
            lexical: Vec::new(),
            syntax: Vec::new(),
            semantic: Vec::new(),
            io_failure: None,
            generation_errors: Vec::new(),
            states: Vec::new(),
            intermediate: Vec::new(),
            optimized: Vec::new(),
            optimization: None,
            duration: Duration::ZERO,
        }
    }

    pub fn diagnostic_count(&self) -> usize {
        self.all_diagnostics().count()
    }

    pub fn has_diagnostics(&self) -> bool {
        self.diagnostic_count() > 0 || !self.generation_errors.is_empty()
    }

    /// Whether the generator and optimizer ran
    pub fn generated_code(&self) -> bool {
        self.optimization.is_some()
    }

    /// All diagnostics in stage order
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.io_failure
            .iter()
            .chain(&self.lexical)
            .chain(&self.syntax)
            .chain(&self.semantic)
    }

    pub(crate) fn settle(&mut self, duration: Duration) {
        self.duration = duration;
        self.status = if self.io_failure.is_some() {
            CompilationStatus::SourceUnreadable
        } else if self.has_diagnostics() {
            CompilationStatus::Diagnostics
        } else {
            CompilationStatus::Compiled
        };
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn log_summary(&self) {
        let duration_ms = format!("{:.2}", self.duration.as_secs_f64() * 1000.0);
        match self.status {
            CompilationStatus::Compiled => crate::log_success!(
                crate::logging::codes::success::COMPILATION_COMPLETE,
                "Compilation complete",
                "unit" => self.unit,
                "tokens" => self.token_count,
                "quadruples" => self.optimized.len(),
                "duration_ms" => duration_ms
            ),
            CompilationStatus::Diagnostics | CompilationStatus::SourceUnreadable => {
                crate::log_info!(
                    "Compilation finished with diagnostics",
                    "unit" => self.unit,
                    "diagnostics" => self.diagnostic_count(),
                    "halted_at" => self.halted_at.map_or("none", |stage| stage.as_str()),
                    "duration_ms" => duration_ms
                )
            }
        }
    }
}
