//! Where stage results go

use crate::diagnostics::{Diagnostic, Stage};
use crate::intermediate::Quadruple;
use crate::tokens::Token;
use serde::Serialize;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuadrupleTable {
    Intermediate,
    Optimized,
}

impl QuadrupleTable {
    pub fn title(&self) -> &'static str {
        match self {
            QuadrupleTable::Intermediate => "Intermediate Code",
            QuadrupleTable::Optimized => "Optimized Code",
        }
    }
}

/// Receives each stage's output as the pipeline runs
pub trait DiagnosticsSink {
    /// Token stream of the unit. Ignored unless the sink displays tokens.
    fn tokens(&mut self, _tokens: &[Token]) -> io::Result<()> {
        Ok(())
    }

    /// Diagnostics of one stage, in reporting order. `None` carries the
    /// unreadable-source failure.
    fn diagnostics(&mut self, stage: Option<Stage>, diagnostics: &[Diagnostic]) -> io::Result<()>;

    fn quadruples(&mut self, table: QuadrupleTable, quadruples: &[Quadruple]) -> io::Result<()>;
}

/// Records everything it receives
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<(Option<Stage>, Vec<Diagnostic>)>,
    pub tables: Vec<(QuadrupleTable, Vec<Quadruple>)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics delivered for a stage, empty if the stage never ran
    pub fn stage(&self, stage: Option<Stage>) -> &[Diagnostic] {
        self.diagnostics
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, list)| list.as_slice())
            .unwrap_or_default()
    }

    pub fn stages_reported(&self) -> Vec<Option<Stage>> {
        self.diagnostics.iter().map(|(stage, _)| *stage).collect()
    }

    pub fn table(&self, table: QuadrupleTable) -> Option<&[Quadruple]> {
        self.tables
            .iter()
            .find(|(t, _)| *t == table)
            .map(|(_, quadruples)| quadruples.as_slice())
    }
}

impl DiagnosticsSink for MemorySink {
    fn tokens(&mut self, tokens: &[Token]) -> io::Result<()> {
        self.tokens = tokens.to_vec();
        Ok(())
    }

    fn diagnostics(&mut self, stage: Option<Stage>, diagnostics: &[Diagnostic]) -> io::Result<()> {
        self.diagnostics.push((stage, diagnostics.to_vec()));
        Ok(())
    }

    fn quadruples(&mut self, table: QuadrupleTable, quadruples: &[Quadruple]) -> io::Result<()> {
        self.tables.push((table, quadruples.to_vec()));
        Ok(())
    }
}
