//! # gql-tg
//!
//! GraphQL schema → TypeScript declarations, in three stages:
//!
//! - [`tokenizer`]: schema text → flat definition tokens
//! - [`parser`]: tokens → resolved [`ir::SchemaModel`] (two-phase name resolution)
//! - [`transpiler`]: model → declarations, each non-scalar type exactly once
//!
//! [`io`] holds the file collaborators; [`transpile_file`] ties everything
//! together and writes the result in a single atomic step.

pub mod config;
pub mod error;
pub mod io;
pub mod ir;
pub mod parser;
pub mod tokenizer;
pub mod transpiler;

use std::path::Path;

pub use config::{EmissionOrder, TranspileOptions};
pub use error::{Error, Result};
pub use transpiler::{Transpiled, Transpiler};

/// Runs the whole pipeline over in-memory schema text.
pub fn transpile_source(source: &str, options: &TranspileOptions) -> Result<Transpiled> {
    let tokens = tokenizer::tokenize(source)?;
    let schema = parser::parse(&tokens)?;
    Ok(Transpiler::new(&schema, options).run())
}

/// Reads `input`, transpiles it and writes `output`. Nothing is written unless
/// every stage succeeds.
pub fn transpile_file(input: &Path, output: &Path, options: &TranspileOptions) -> Result<Transpiled> {
    io::check_output_path(output)?;
    let source = io::read_schema(input)?;
    let transpiled = transpile_source(&source, options)?;
    io::write_definitions(output, &transpiled.output)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        declarations = transpiled.declarations,
        "transpiled schema file"
    );
    Ok(transpiled)
}
