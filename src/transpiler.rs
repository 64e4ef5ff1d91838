//! `SchemaModel` → TypeScript declarations.
//!
//! One argument-record interface per request that takes arguments, then one
//! declaration per non-scalar type. The emitted set guarantees each type is
//! written exactly once no matter how many fields point at it or whether the
//! references form cycles.
pub mod render;

use std::collections::HashSet;
use chrono::Local;

use crate::config::{EmissionOrder, TranspileOptions};
use crate::ir::{ExecutionRequest, NonScalarType, RootOperationKind, SchemaModel, TypeBody};
use render::DeclarationKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transpiled {
    pub output: String,
    pub declarations: usize,
}

pub struct Transpiler<'s> {
    schema: &'s SchemaModel,
    options: &'s TranspileOptions,
    emitted: HashSet<&'s str>,
    output: String,
    declarations: usize,
}

impl<'s> Transpiler<'s> {
    pub fn new(schema: &'s SchemaModel, options: &'s TranspileOptions) -> Self {
        Self {
            schema,
            options,
            emitted: HashSet::with_capacity(schema.non_scalar_types.len()),
            output: String::new(),
            declarations: 0,
        }
    }

    pub fn run(mut self) -> Transpiled {
        if self.options.header {
            let timestamp = self.options.timestamp.then(Local::now);
            self.output.push_str(&render::header(timestamp));
        }

        let schema = self.schema;

        // 1) argument records, query → mutation → subscription
        for operation in schema.root_operations.values() {
            for request in &operation.requests {
                if self.options.order == EmissionOrder::Dependencies {
                    for label in request.references() {
                        self.emit_with_dependencies(label);
                    }
                }
                self.emit_argument_record(operation.kind, request);
            }
        }

        // 2) every non-scalar type, referenced or not
        for ty in schema.non_scalar_types.values() {
            match self.options.order {
                EmissionOrder::Declaration => self.emit_non_scalar(ty),
                EmissionOrder::Dependencies => self.emit_with_dependencies(&ty.label),
            }
        }

        tracing::debug!(declarations = self.declarations, bytes = self.output.len(), "transpiled schema");
        Transpiled { output: self.output, declarations: self.declarations }
    }

    fn emit_argument_record(&mut self, kind: RootOperationKind, request: &ExecutionRequest) {
        if request.argument_count() == 0 {
            return;
        }
        let label = render::join_camel_case(&[&request.name, kind.as_str(), render::ARG_SUFFIX]);
        let body = render::fields(&request.arguments, &self.options.indent);
        self.write(&label, render::declaration(DeclarationKind::Interface, &label, &body));
    }

    fn emit_non_scalar(&mut self, ty: &'s NonScalarType) {
        if self.emitted.insert(&ty.label) {
            self.write_non_scalar(ty);
        }
    }

    /// Depth-first: referenced types are written before the type itself.
    /// A type is marked before its references are visited, so cycles stop.
    fn emit_with_dependencies(&mut self, label: &str) {
        let schema = self.schema;
        let Some(ty) = schema.non_scalar(label) else {
            return;
        };
        if !self.emitted.insert(&ty.label) {
            return;
        }
        for reference in ty.references() {
            self.emit_with_dependencies(reference);
        }
        self.write_non_scalar(ty);
    }

    fn write_non_scalar(&mut self, ty: &NonScalarType) {
        let indent = &self.options.indent;
        let body = match (&ty.body, DeclarationKind::of(ty.kind)) {
            (TypeBody::Members(members), DeclarationKind::TypeAlias) => render::union_members(members),
            (TypeBody::Members(members), _) => render::enum_members(members, indent),
            (TypeBody::Fields(fields), _) => render::fields(fields, indent),
        };
        let declaration = render::declaration(DeclarationKind::of(ty.kind), &ty.label, &body);
        self.write(&ty.label, declaration);
    }

    fn write(&mut self, label: &str, declaration: String) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str(&declaration);
        self.declarations += 1;
        tracing::trace!(label, "emitted declaration");
    }
}
