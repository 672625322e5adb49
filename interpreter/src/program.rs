use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::memory::Memory;

/// A program as written in a TOML file: starting memory and a list of `[[step]]` tables.
///
/// Unknown top-level keys are rejected, so a misspelled section fails to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Program {
    #[serde(default)]
    pub memory: Memory,

    #[serde(default, rename = "step")]
    pub steps: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Statement {
    Set {
        variable: String,
        value: Expr,
    },
    Increment(String),
    Log(String),
    /// Log the whole memory under a label.
    Trace(String),
    If {
        condition: Condition,
        #[serde(default)]
        then: Vec<Statement>,
        #[serde(default, rename = "else")]
        otherwise: Vec<Statement>,
    },
    While {
        condition: Condition,
        #[serde(default)]
        body: Vec<Statement>,
    },
    Try {
        #[serde(default)]
        attempt: Vec<Statement>,
        #[serde(default)]
        recover: Vec<Statement>,
    },
}

/// A numeric expression: `3`, `"a"`, `{ add = ["a", 1] }`, `{ neg = "a" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Operation(Operation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
}

/// A boolean test: `true`, `{ less = ["a", 10] }`, `{ defined = "a" }`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Literal(bool),
    Test(Test),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Test {
    Less(Expr, Expr),
    LessEqual(Expr, Expr),
    Greater(Expr, Expr),
    GreaterEqual(Expr, Expr),
    Equal(Expr, Expr),
    NotEqual(Expr, Expr),
    Not(Box<Condition>),
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Defined(String),
}

/// Parse a program from TOML source. `file_id` tags any error for diagnostics.
pub fn load_program(source: &str, file_id: usize) -> Result<Program, LoadError> {
    toml::from_str(source).map_err(|e| LoadError::from_toml(&e, file_id))
}

/// Build a program from an already parsed TOML table, such as what is left of
/// a test file once its `[test]` table is removed.
pub fn program_from_table(table: toml::Table, file_id: usize) -> Result<Program, LoadError> {
    toml::Value::Table(table)
        .try_into()
        .map_err(|e| LoadError::from_toml(&e, file_id))
}

/// Read and parse a program file, returning the source alongside it.
pub fn load_program_file(path: &Path, file_id: usize) -> Result<(String, Program), LoadError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        LoadError::new(format!("cannot read '{}': {}", path.display(), e), None, file_id)
    })?;
    let program = load_program(&source, file_id)?;
    Ok((source, program))
}
