use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema file must be a graphql file: {}", path.display())]
    SchemaFormat { path: PathBuf },

    #[error("Failed to read the input schema file {}: {source}", path.display())]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No type definitions found in the schema file!")]
    NoDefinitionsFound,

    #[error("Unresolved type `{label}` referenced by {referenced_by}")]
    UnresolvedType { label: String, referenced_by: String },

    #[error("Output file must be a TypeScript (.ts) file: {}", path.display())]
    OutputFormat { path: PathBuf },

    #[error("Failed to write the output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed definition at line {line}: {message}")]
    MalformedDefinition { line: usize, message: String },

    #[error("`{label}` is defined more than once")]
    DuplicateDefinition { label: String },
}

impl Error {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Error::MalformedDefinition { line, message: message.into() }
    }

    /// Stable name of the error kind, independent of the message payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::SchemaFormat { .. } => "SchemaFormat",
            Error::SchemaRead { .. } => "SchemaRead",
            Error::NoDefinitionsFound => "NoDefinitionsFound",
            Error::UnresolvedType { .. } => "UnresolvedType",
            Error::OutputFormat { .. } => "OutputFormat",
            Error::OutputWrite { .. } => "OutputWrite",
            Error::MalformedDefinition { .. } => "MalformedDefinition",
            Error::DuplicateDefinition { .. } => "DuplicateDefinition",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
