use serde::Serialize;

/// Extension the input schema must carry.
pub const SCHEMA_FILE_EXTENSION: &str = "graphql";

/// Extension the generated declarations must carry.
pub const OUTPUT_FILE_EXTENSION: &str = "ts";

pub const DEFAULT_INDENT: &str = "  ";

/// Order in which non-scalar declarations are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EmissionOrder {
    /// one flat pass in declaration order (forward references are legal in TypeScript)
    #[default]
    Declaration,
    /// referenced types first, depth-first from the root operations
    Dependencies,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranspileOptions {
    pub header: bool,    // leading "generated file" comment
    pub timestamp: bool, // local time inside the header
    pub order: EmissionOrder,
    pub indent: String,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            header: true,
            timestamp: true,
            order: EmissionOrder::default(),
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl TranspileOptions {
    /// Deterministic output: no header, so repeated runs are byte-identical.
    pub fn bare() -> Self {
        Self { header: false, timestamp: false, ..Self::default() }
    }

    pub fn with_order(mut self, order: EmissionOrder) -> Self {
        self.order = order;
        self
    }
}
