use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::ir::{NamedKind, NamedType, Scalar};
use crate::tokenizer::TokenizedDefinition;

/// `label → kind` for every name a field may reference.
///
/// Built in a single pass over the non-scalar definitions before anything is
/// resolved, so declaration order and cycles between types do not matter.
#[derive(Debug, Clone)]
pub struct NamedTypeTable {
    labels: IndexMap<String, NamedKind>,
}

impl Default for NamedTypeTable {
    fn default() -> Self {
        let labels = Scalar::ALL
            .iter()
            .map(|scalar| (scalar.label().to_string(), NamedKind::Scalar))
            .collect();
        Self { labels }
    }
}

impl NamedTypeTable {
    pub fn from_definitions<'a, I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a TokenizedDefinition>,
    {
        let mut table = Self::default();
        for def in definitions {
            let kind = NamedKind::from_keyword(&def.kind).ok_or_else(|| {
                Error::malformed(def.line, format!("unknown declaration keyword `{}`", def.kind))
            })?;
            if table.labels.insert(def.label.clone(), kind).is_some() {
                return Err(Error::DuplicateDefinition { label: def.label.clone() });
            }
        }
        tracing::debug!(labels = table.labels.len(), "built named type table");
        Ok(table)
    }

    pub fn get(&self, label: &str) -> Option<NamedKind> {
        self.labels.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Classify a bare label; `referenced_by` only feeds the error message.
    pub fn resolve(&self, label: &str, referenced_by: impl FnOnce() -> String) -> Result<NamedType> {
        match self.get(label) {
            Some(NamedKind::Scalar) => Scalar::from_label(label)
                .map(NamedType::Scalar)
                .ok_or_else(|| Error::UnresolvedType { label: label.to_string(), referenced_by: referenced_by() }),
            Some(kind) => Ok(NamedType::NonScalar { kind, label: label.to_string() }),
            None => Err(Error::UnresolvedType { label: label.to_string(), referenced_by: referenced_by() }),
        }
    }
}
