use crate::compile::compile;
use crate::error::InstructionError;
use crate::memory::Memory;
use crate::program::Program;

/// The outcome of a program that ran to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub memory: Memory,
}

pub fn execute_program(program: &Program) -> Result<Execution, InstructionError> {
    execute_program_with(program, Memory::new())
}

/// Run `program` with `overrides` written over its initial memory.
pub fn execute_program_with(
    program: &Program,
    overrides: Memory,
) -> Result<Execution, InstructionError> {
    let initial = program.memory.layered(&overrides);
    tracing::debug!(steps = program.steps.len(), memory = %initial, "executing program");

    let instruction = compile(&program.steps);
    match instruction.run(initial) {
        Ok(data) => Ok(Execution { memory: data.state }),
        Err(error) => {
            tracing::debug!(%error, "program failed");
            Err(error)
        }
    }
}
