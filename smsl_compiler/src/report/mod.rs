//! Console rendering of compilation output

use crate::diagnostics::{Diagnostic, Stage};
use crate::intermediate::Quadruple;
use crate::pipeline::{DiagnosticsSink, QuadrupleTable};
use crate::tokens::{group_by_line, Token, TokenKind};
use std::io::{self, Write};

const TOKEN_RULE: &str =
    " -----------------------------------------------------------------------------------";
const QUADRUPLE_RULE: &str = "-------------------------------------------------------------------------";

/// Writes token tables, parse trees, diagnostics and quadruple tables as text
pub struct ConsoleSink<W: Write> {
    out: W,
    show_tokens: bool,
    show_parse_trees: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_tokens: false,
            show_parse_trees: false,
        }
    }

    pub fn with_tokens(mut self, show: bool) -> Self {
        self.show_tokens = show;
        self
    }

    pub fn with_parse_trees(mut self, show: bool) -> Self {
        self.show_parse_trees = show;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn token_table(&mut self, tokens: &[Token]) -> io::Result<()> {
        writeln!(self.out, "{}", TOKEN_RULE)?;
        writeln!(
            self.out,
            "| {:<8} | {:<32} | {:<14} | {:<11} |",
            "Line", "Lexeme", "Token", "Token Index"
        )?;
        writeln!(self.out, "{}", TOKEN_RULE)?;
        for token in tokens {
            writeln!(
                self.out,
                "| {:<8} | {:<32} | {:<14} | {:<11} |",
                token.line_number,
                token.lexeme,
                token.kind.as_str(),
                token.kind.index()
            )?;
        }
        writeln!(self.out, "{}", TOKEN_RULE)
    }

    fn parse_trees(&mut self, tokens: &[Token]) -> io::Result<()> {
        for line in group_by_line(tokens) {
            writeln!(self.out, "Line {}:", line.number)?;
            writeln!(self.out, "  Root")?;
            for token in line.tokens {
                match token.kind {
                    kind if kind.is_keyword() => {
                        writeln!(self.out, "    ├── {} -> {}", kind.as_str(), token.lexeme)?
                    }
                    TokenKind::Identifier => {
                        writeln!(self.out, "    │   ├── Identifier -> {}", token.lexeme)?
                    }
                    _ => writeln!(self.out, "    │   ├── Symbol -> {}", token.lexeme)?,
                }
            }
        }
        Ok(())
    }
}

impl<W: Write> DiagnosticsSink for ConsoleSink<W> {
    fn tokens(&mut self, tokens: &[Token]) -> io::Result<()> {
        if self.show_tokens {
            self.token_table(tokens)?;
        }
        if self.show_parse_trees {
            self.parse_trees(tokens)?;
        }
        Ok(())
    }

    fn diagnostics(&mut self, stage: Option<Stage>, diagnostics: &[Diagnostic]) -> io::Result<()> {
        if diagnostics.is_empty() {
            if stage == Some(Stage::Semantic) {
                writeln!(self.out, "\nNo semantic errors found.")?;
            }
            return Ok(());
        }

        match stage {
            Some(stage) => writeln!(self.out, "\n{} Errors:", stage)?,
            None => writeln!(self.out, "\nSource Errors:")?,
        }
        for diagnostic in diagnostics {
            match &diagnostic.detail {
                Some(detail) => writeln!(self.out, "{} ({})", diagnostic.message, detail)?,
                None => writeln!(self.out, "{}", diagnostic.message)?,
            }
        }
        Ok(())
    }

    fn quadruples(&mut self, table: QuadrupleTable, quadruples: &[Quadruple]) -> io::Result<()> {
        writeln!(self.out, "\n------------------ {} ------------------", table.title())?;
        writeln!(
            self.out,
            "| {:<15} | {:<15} | {:<15} | {:<15} |",
            "Operation", "Arg1", "Arg2", "Result"
        )?;
        writeln!(self.out, "{}", QUADRUPLE_RULE)?;
        for quadruple in quadruples {
            writeln!(
                self.out,
                "| {:<15} | {:<15} | {:<15} | {:<15} |",
                quadruple.operation.as_str(),
                quadruple.arg1,
                quadruple.arg2,
                quadruple.arg3
            )?;
        }
        writeln!(self.out, "{}", QUADRUPLE_RULE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;
    use crate::logging::codes;

    fn rendered<F>(sink: ConsoleSink<Vec<u8>>, f: F) -> String
    where
        F: FnOnce(&mut ConsoleSink<Vec<u8>>) -> io::Result<()>,
    {
        let mut sink = sink;
        f(&mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn test_token_table_rows() {
        let lexed = tokenize(&["state Idle {"]);
        let text = rendered(ConsoleSink::new(Vec::new()).with_tokens(true), |sink| {
            sink.tokens(&lexed.tokens)
        });

        assert!(text.contains("| Line     | Lexeme"));
        assert!(text.contains("| 1        | state                            | STATE          | 1           |"));
        assert!(text.contains("| IDENTIFIER     |"));
    }

    #[test]
    fn test_tokens_hidden_by_default() {
        let lexed = tokenize(&["state Idle {"]);
        let text = rendered(ConsoleSink::new(Vec::new()), |sink| sink.tokens(&lexed.tokens));
        assert!(text.is_empty());
    }

    #[test]
    fn test_parse_tree_branches() {
        let lexed = tokenize(&["state Idle {"]);
        let text = rendered(ConsoleSink::new(Vec::new()).with_parse_trees(true), |sink| {
            sink.tokens(&lexed.tokens)
        });

        assert_eq!(
            text,
            "Line 1:\n  Root\n    ├── STATE -> state\n    │   ├── Identifier -> Idle\n    │   ├── Symbol -> {\n"
        );
    }

    #[test]
    fn test_quadruple_table() {
        let text = rendered(ConsoleSink::new(Vec::new()), |sink| {
            sink.quadruples(
                QuadrupleTable::Optimized,
                &[Quadruple::transition("t1", "e1", "Busy")],
            )
        });

        assert!(text.contains("Optimized Code"));
        assert!(text.contains("| TRANSITION      | t1              | e1              | Busy            |"));
    }

    #[test]
    fn test_diagnostics_with_detail() {
        let diagnostic = Diagnostic::new(
            Stage::Syntax,
            Some(3),
            codes::syntax::INVALID_STATEMENT,
            "Line 3: Syntax Error [Error]",
        )
        .with_detail("unrecognized statement");
        let text = rendered(ConsoleSink::new(Vec::new()), |sink| {
            sink.diagnostics(Some(Stage::Syntax), &[diagnostic])
        });

        assert_eq!(
            text,
            "\nSyntax Errors:\nLine 3: Syntax Error [Error] (unrecognized statement)\n"
        );
    }

    #[test]
    fn test_clean_semantic_stage_is_announced() {
        let text = rendered(ConsoleSink::new(Vec::new()), |sink| {
            sink.diagnostics(Some(Stage::Semantic), &[])
        });
        assert_eq!(text, "\nNo semantic errors found.\n");
    }
}
