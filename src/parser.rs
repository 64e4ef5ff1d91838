//! Tokens → resolved `SchemaModel`.
//!
//! Phase 1 collects every non-scalar label into the `NamedTypeTable`.
//! Phase 2 parses root operations and type bodies, resolving each type
//! reference by lookup only, never by recursing into the referenced type.
pub mod signature;
pub mod table;

use std::collections::{BTreeMap, HashSet};
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::ir::{
    ExecutionRequest, FieldDef, FieldType, NamedKind, NonScalarType, RootOperation, SchemaModel, TypeBody,
};
use crate::tokenizer::{Tokenized, TokenizedDefinition};
pub use table::NamedTypeTable;

/// Separates a name from its type signature.
pub const FIELD_SEPARATOR: char = ':';

pub fn parse(tokens: &Tokenized) -> Result<SchemaModel> {
    Parser::new(tokens)?.parse()
}

pub struct Parser<'t> {
    tokens: &'t Tokenized,
    table: NamedTypeTable,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t Tokenized) -> Result<Self> {
        if tokens.is_empty() {
            return Err(Error::NoDefinitionsFound);
        }
        let table = NamedTypeTable::from_definitions(&tokens.non_scalars)?;
        Ok(Self { tokens, table })
    }

    pub fn table(&self) -> &NamedTypeTable {
        &self.table
    }

    pub fn parse(&self) -> Result<SchemaModel> {
        let root_operations = self.parse_root_operations()?;
        let non_scalar_types = self.parse_non_scalars()?;
        tracing::debug!(
            root_operations = root_operations.len(),
            non_scalar_types = non_scalar_types.len(),
            "parsed schema"
        );
        Ok(SchemaModel { root_operations, non_scalar_types })
    }

    // ------------------------------------------------------------------------
    // root operations
    // ------------------------------------------------------------------------

    fn parse_root_operations(&self) -> Result<BTreeMap<crate::ir::RootOperationKind, RootOperation>> {
        let mut out = BTreeMap::new();
        for def in &self.tokens.root_operations {
            let Some(kind) = def.root_operation() else {
                continue;
            };
            if out.contains_key(&kind) {
                return Err(Error::DuplicateDefinition { label: def.label.clone() });
            }
            let requests = def
                .entries
                .iter()
                .map(|entry| self.parse_request(def, entry))
                .collect::<Result<Vec<_>>>()?;
            let mut names = HashSet::with_capacity(requests.len());
            if let Some(repeated) = requests.iter().find(|request| !names.insert(request.name.as_str())) {
                return Err(Error::DuplicateDefinition { label: format!("{}.{}", def.label, repeated.name) });
            }
            // a root block without requests is left out of the model
            if !requests.is_empty() {
                out.insert(kind, RootOperation { kind, requests });
            }
        }
        Ok(out)
    }

    fn parse_request(&self, def: &TokenizedDefinition, entry: &str) -> Result<ExecutionRequest> {
        let (signature, returns) = split_request(entry)
            .ok_or_else(|| Error::malformed(def.line, format!("`{entry}` in `{}` has no return type", def.label)))?;

        let mut segments = signature.split(['(', ',', ')']).filter(|segment| !segment.is_empty());
        let name = segments
            .next()
            .ok_or_else(|| Error::malformed(def.line, format!("`{entry}` in `{}` has no name", def.label)))?;

        let arguments = segments
            .map(|raw| -> Result<FieldDef> {
                let (label, sig) = raw.split_once(FIELD_SEPARATOR).ok_or_else(|| {
                    Error::malformed(def.line, format!("argument `{raw}` of `{name}` has no type"))
                })?;
                let field_type = self.resolve(def, sig, || format!("argument `{label}` of `{}.{name}`", def.label))?;
                Ok(FieldDef { label: label.to_string(), field_type })
            })
            .collect::<Result<Vec<_>>>()?;

        let returns = self.resolve(def, returns, || format!("return type of `{}.{name}`", def.label))?;

        Ok(ExecutionRequest { name: name.to_string(), arguments, returns })
    }

    // ------------------------------------------------------------------------
    // non-scalar types
    // ------------------------------------------------------------------------

    fn parse_non_scalars(&self) -> Result<IndexMap<String, NonScalarType>> {
        let mut out = IndexMap::with_capacity(self.tokens.non_scalars.len());
        for def in &self.tokens.non_scalars {
            let parsed = self.parse_non_scalar(def)?;
            out.insert(parsed.label.clone(), parsed);
        }
        Ok(out)
    }

    fn parse_non_scalar(&self, def: &TokenizedDefinition) -> Result<NonScalarType> {
        // phase 1 already classified every non-scalar label
        let kind = self
            .table
            .get(&def.label)
            .ok_or_else(|| Error::malformed(def.line, format!("`{}` was not registered", def.label)))?;

        let body = match kind {
            NamedKind::Enum => TypeBody::Members(def.entries.clone()),
            NamedKind::Union => {
                for member in &def.entries {
                    self.table.resolve(member, || format!("union `{}`", def.label))?;
                }
                TypeBody::Members(def.entries.clone())
            }
            _ => TypeBody::Fields(
                def.entries
                    .iter()
                    .map(|entry| self.parse_field(def, entry))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };

        Ok(NonScalarType { kind, label: def.label.clone(), body })
    }

    /// `label:type`, or `label(args):type` where the arguments are checked but not kept.
    fn parse_field(&self, def: &TokenizedDefinition, entry: &str) -> Result<FieldDef> {
        if entry.contains('(') {
            let request = self.parse_request(def, entry)?;
            return Ok(FieldDef { label: request.name, field_type: request.returns });
        }
        let (label, sig) = entry
            .split_once(FIELD_SEPARATOR)
            .ok_or_else(|| Error::malformed(def.line, format!("field `{entry}` in `{}` has no type", def.label)))?;
        let field_type = self.resolve(def, sig, || format!("field `{}.{label}`", def.label))?;
        Ok(FieldDef { label: label.to_string(), field_type })
    }

    fn resolve(
        &self,
        def: &TokenizedDefinition,
        raw: &str,
        referenced_by: impl FnOnce() -> String,
    ) -> Result<FieldType> {
        let sig = signature::decode(raw)
            .ok_or_else(|| Error::malformed(def.line, format!("invalid type signature `{raw}` in `{}`", def.label)))?;
        let named = self.table.resolve(sig.label, referenced_by)?;
        Ok(FieldType {
            named,
            is_optional: sig.is_optional,
            list_depth: sig.list_depth,
            is_list_value_optional: sig.is_list_value_optional,
        })
    }
}

/// Splits `name(args):Return` after the closing parenthesis, or `name:Return`
/// after the name.
fn split_request(entry: &str) -> Option<(&str, &str)> {
    match entry.find('(') {
        Some(open) if entry[..open].find(FIELD_SEPARATOR).is_none() => {
            let close = open + entry[open..].find(')')?;
            let returns = entry[close + 1..].strip_prefix(FIELD_SEPARATOR)?;
            Some((&entry[..=close], returns))
        }
        _ => entry.split_once(FIELD_SEPARATOR),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
