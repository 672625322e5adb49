pub mod compile;
pub mod error;
pub mod executor;
pub mod instruction;
pub mod memory;
pub mod program;

pub use error::{InstructionError, LoadError};
pub use executor::{Execution, execute_program, execute_program_with};
pub use instruction::Instruction;
pub use memory::Memory;
pub use program::{Program, load_program, load_program_file, program_from_table};
