//! Intermediate code: quadruples for actions and transitions

pub mod generator;
pub mod quadruple;

pub use generator::{GenerationOutput, GeneratorError, IntermediateCodeGenerator};
pub use quadruple::{Operation, Quadruple};

pub fn generate<S: AsRef<str>>(lines: &[S]) -> GenerationOutput {
    IntermediateCodeGenerator::new().generate(lines)
}
